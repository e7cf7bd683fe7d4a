//! Entity marker types for the PSA resources this client exposes.
//!
//! Each resource is a unit struct naming its endpoint, with empty impls of
//! the capability traits its API surface declares. Records are opaque
//! key/value maps; no per-resource schema is modeled.

use crate::traits::{Create, Delete, Entity, Get, List, Patch, Update};

macro_rules! entity {
    ($(#[$meta:meta])* $name:ident, $endpoint:literal: $($cap:ident),+ $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Entity for $name {
            const ENDPOINT: &'static str = $endpoint;
        }

        $(impl $cap for $name {})+
    };
}

entity! {
    /// Calendar appointments for resources.
    Appointments, "Appointments": Create, Get, Update, Patch, Delete, List
}

entity! {
    /// Time logged against tickets, tasks, and internal codes.
    TimeEntries, "TimeEntries": Create, Get, Update, Patch, Delete, List
}

entity! {
    /// Sales quotes attached to opportunities.
    Quotes, "Quotes": Create, Get, Update, Patch, List
}

entity! {
    /// Service desk tickets.
    Tickets, "Tickets": Create, Get, Update, Patch, List
}

entity! {
    /// Notes attached to tickets.
    TicketNotes, "TicketNotes": Create, Get, Update, Patch, List
}

entity! {
    /// Customer accounts.
    Companies, "Companies": Create, Get, Update, Patch, List
}

entity! {
    /// Contact persons at customer accounts.
    Contacts, "Contacts": Create, Get, Update, Patch, Delete, List
}

entity! {
    /// Service and retainer contracts.
    Contracts, "Contracts": Create, Get, Update, Patch, List
}

entity! {
    /// Customer-facing projects.
    Projects, "Projects": Create, Get, Update, Patch, List
}

entity! {
    /// Tasks within projects.
    Tasks, "Tasks": Create, Get, Update, Patch, List
}

entity! {
    /// Sales opportunities.
    Opportunities, "Opportunities": Create, Get, Update, Patch, List
}

entity! {
    /// Scheduled on-site service calls.
    ServiceCalls, "ServiceCalls": Create, Get, Update, Patch, Delete, List
}

entity! {
    /// Staff members. Managed in the admin UI; read-only through the API.
    Resources, "Resources": Get, List
}

entity! {
    /// Devices and assets tracked per company.
    ConfigurationItems, "ConfigurationItems": Create, Get, Update, Patch, Delete, List
}

entity! {
    /// Expense reports submitted by resources.
    ExpenseReports, "ExpenseReports": Create, Get, Update, Patch, Delete, List
}

entity! {
    /// Purchase orders for inventory.
    PurchaseOrders, "PurchaseOrders": Create, Get, Update, Patch, List
}

entity! {
    /// Generated invoices. Created by billing runs, not through the API.
    Invoices, "Invoices": Get, Patch, List
}

entity! {
    /// Billing/allocation codes.
    BillingCodes, "BillingCodes": Get, List
}

entity! {
    /// Reference list of countries. Read-only.
    Countries, "Countries": Get, List
}
