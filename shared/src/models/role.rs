//! Staff Roles and Capabilities
//!
//! Pure role -> capability policy table. The matrix never changes at
//! runtime, so it is a compile-time `match` with no state and no I/O.

use serde::{Deserialize, Serialize};

/// Fixed staff role set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Manager,
    Server,
    Chef,
    Bartender,
    Host,
}

impl StaffRole {
    pub const ALL: [StaffRole; 5] = [
        StaffRole::Manager,
        StaffRole::Server,
        StaffRole::Chef,
        StaffRole::Bartender,
        StaffRole::Host,
    ];

    /// Parse the wire rendition (`x-staff-role` header), case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "manager" => Some(StaffRole::Manager),
            "server" => Some(StaffRole::Server),
            "chef" => Some(StaffRole::Chef),
            "bartender" => Some(StaffRole::Bartender),
            "host" => Some(StaffRole::Host),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Manager => "manager",
            StaffRole::Server => "server",
            StaffRole::Chef => "chef",
            StaffRole::Bartender => "bartender",
            StaffRole::Host => "host",
        }
    }

    /// The normative capability matrix.
    pub fn has_capability(self, capability: Capability) -> bool {
        use Capability::*;
        use StaffRole::*;
        match capability {
            ManagerAccess => matches!(self, Manager),
            Inventory => matches!(self, Manager | Chef),
            StaffManagement => matches!(self, Manager),
            Reports => matches!(self, Manager),
            CreateTickets => matches!(self, Manager | Server),
            ViewTickets => matches!(self, Manager | Server | Chef | Bartender),
            UpdateTicketStatus => matches!(self, Manager | Server | Chef | Bartender),
            ViewMenu => true,
            Tables => matches!(self, Manager | Server | Host),
            CreateTableUpdates => matches!(self, Manager | Server | Host),
            BeverageInventory => matches!(self, Manager | Bartender),
        }
    }

    /// Route-level gating: manager-only route prefixes are restricted to
    /// Manager; every other route is unrestricted by this table and
    /// relies on per-route capability checks. Ticket routes in
    /// particular must stay open here, since the capability matrix
    /// grants Chef and Bartender ticket reads and status updates.
    pub fn can_access_route(self, path: &str) -> bool {
        const MANAGER_ONLY: &[&str] = &["/api/reports", "/api/staff", "/api/inventory"];

        if MANAGER_ONLY.iter().any(|p| path.starts_with(p)) {
            return matches!(self, StaffRole::Manager);
        }
        true
    }

    /// Full capability map for this role (UI gating pass-through).
    pub fn capability_map(self) -> Vec<(Capability, bool)> {
        Capability::ALL
            .iter()
            .map(|&c| (c, self.has_capability(c)))
            .collect()
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability set consulted by handlers and UI gating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManagerAccess,
    Inventory,
    StaffManagement,
    Reports,
    CreateTickets,
    ViewTickets,
    UpdateTicketStatus,
    ViewMenu,
    Tables,
    CreateTableUpdates,
    BeverageInventory,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::ManagerAccess,
        Capability::Inventory,
        Capability::StaffManagement,
        Capability::Reports,
        Capability::CreateTickets,
        Capability::ViewTickets,
        Capability::UpdateTicketStatus,
        Capability::ViewMenu,
        Capability::Tables,
        Capability::CreateTableUpdates,
        Capability::BeverageInventory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ManagerAccess => "manager_access",
            Capability::Inventory => "inventory",
            Capability::StaffManagement => "staff_management",
            Capability::Reports => "reports",
            Capability::CreateTickets => "create_tickets",
            Capability::ViewTickets => "view_tickets",
            Capability::UpdateTicketStatus => "update_ticket_status",
            Capability::ViewMenu => "view_menu",
            Capability::Tables => "tables",
            Capability::CreateTableUpdates => "create_table_updates",
            Capability::BeverageInventory => "beverage_inventory",
        }
    }
}
