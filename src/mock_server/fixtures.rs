//! Test data fixtures for the mock server.

use crate::record::Record;

use super::state::MockState;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// A minimal ticket record.
    pub fn ticket(title: &str, priority: i64) -> Record {
        Record::new()
            .field("title", title)
            .field("priority", priority)
            .field("status", 1)
    }

    /// An appointment for a resource.
    pub fn appointment(title: &str, resource_id: i64) -> Record {
        Record::new()
            .field("title", title)
            .field("resourceID", resource_id)
            .field("startDateTime", "2026-08-29T09:00:00Z")
            .field("endDateTime", "2026-08-29T10:00:00Z")
    }

    /// A time entry against a ticket.
    pub fn time_entry(ticket_id: i64, hours: f64) -> Record {
        Record::new()
            .field("ticketID", ticket_id)
            .field("hoursWorked", hours)
            .field("billable", true)
    }

    /// A staff resource.
    pub fn resource(first_name: &str, last_name: &str) -> Record {
        Record::new()
            .field("firstName", first_name)
            .field("lastName", last_name)
            .field("isActive", true)
    }

    /// The default scenario served by [`MockServer::start`]: a handful of
    /// tickets with appointments and time entries attached.
    ///
    /// [`MockServer::start`]: super::MockServer::start
    pub fn default_state() -> MockState {
        let mut state = MockState::new();

        let support = state.insert("Resources", Self::resource("Sam", "Onsite"));
        let resource_id = support.id.expect("inserted records carry an id");

        let ticket = state.insert("Tickets", Self::ticket("Printer on fire", 1));
        state.insert("Tickets", Self::ticket("Password reset", 3));
        state.insert("Tickets", Self::ticket("Server migration", 2));

        let ticket_id = ticket.id.expect("inserted records carry an id");
        state.insert("Appointments", Self::appointment("On-site visit", resource_id));
        state.insert("TimeEntries", Self::time_entry(ticket_id, 1.5));

        state
    }
}
