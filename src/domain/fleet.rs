// Fleet snapshot - the fixed dataset the chatbot answers from

#[derive(Debug, Clone)]
pub struct PlantSummary {
    pub name: &'static str,
    pub capacity_mw: f64,
    pub generation_today_mwh: f64,
    pub performance_ratio: f64,
    pub inverters_online: u32,
    pub inverters_total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaintenanceTicket {
    pub id: &'static str,
    pub plant: &'static str,
    pub summary: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub part: &'static str,
    pub on_hand: u32,
    pub reorder_level: u32,
}

impl InventoryItem {
    pub fn needs_reorder(&self) -> bool {
        self.on_hand <= self.reorder_level
    }
}

#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: &'static str,
    pub customer: &'static str,
    pub amount_usd: f64,
    pub paid: bool,
}

#[derive(Debug, Clone)]
pub struct Shipment {
    pub id: &'static str,
    pub contents: &'static str,
    pub eta_days: u32,
    pub delayed: bool,
}

#[derive(Debug, Clone)]
pub struct FleetSnapshot {
    pub plants: Vec<PlantSummary>,
    pub tickets: Vec<MaintenanceTicket>,
    pub inventory: Vec<InventoryItem>,
    pub invoices: Vec<Invoice>,
    pub shipments: Vec<Shipment>,
}

impl FleetSnapshot {
    pub fn synthetic() -> Self {
        Self {
            plants: vec![
                PlantSummary {
                    name: "Solar Park North",
                    capacity_mw: 50.0,
                    generation_today_mwh: 212.4,
                    performance_ratio: 0.82,
                    inverters_online: 24,
                    inverters_total: 25,
                },
                PlantSummary {
                    name: "Desert Ridge",
                    capacity_mw: 120.0,
                    generation_today_mwh: 598.7,
                    performance_ratio: 0.79,
                    inverters_online: 58,
                    inverters_total: 60,
                },
                PlantSummary {
                    name: "Lakeside Rooftop",
                    capacity_mw: 4.5,
                    generation_today_mwh: 17.9,
                    performance_ratio: 0.86,
                    inverters_online: 9,
                    inverters_total: 9,
                },
            ],
            tickets: vec![
                MaintenanceTicket {
                    id: "MT-1042",
                    plant: "Desert Ridge",
                    summary: "INV-17 tripping on DC overvoltage",
                    priority: Priority::High,
                },
                MaintenanceTicket {
                    id: "MT-1043",
                    plant: "Solar Park North",
                    summary: "Module cleaning, blocks 3-5",
                    priority: Priority::Low,
                },
                MaintenanceTicket {
                    id: "MT-1047",
                    plant: "Desert Ridge",
                    summary: "String combiner fuse replacement",
                    priority: Priority::Medium,
                },
            ],
            inventory: vec![
                InventoryItem {
                    part: "String fuse 15A",
                    on_hand: 120,
                    reorder_level: 50,
                },
                InventoryItem {
                    part: "Inverter cooling fan",
                    on_hand: 4,
                    reorder_level: 6,
                },
                InventoryItem {
                    part: "MC4 connector pair",
                    on_hand: 800,
                    reorder_level: 200,
                },
            ],
            invoices: vec![
                Invoice {
                    id: "INV-2024-031",
                    customer: "Northern Grid Co",
                    amount_usd: 184_250.0,
                    paid: true,
                },
                Invoice {
                    id: "INV-2024-032",
                    customer: "Desert Power Authority",
                    amount_usd: 402_900.0,
                    paid: false,
                },
            ],
            shipments: vec![
                Shipment {
                    id: "SH-552",
                    contents: "Inverter cooling fans (20)",
                    eta_days: 3,
                    delayed: false,
                },
                Shipment {
                    id: "SH-558",
                    contents: "Replacement modules (140)",
                    eta_days: 12,
                    delayed: true,
                },
            ],
        }
    }

    pub fn total_capacity_mw(&self) -> f64 {
        self.plants.iter().map(|p| p.capacity_mw).sum()
    }

    pub fn total_generation_mwh(&self) -> f64 {
        self.plants.iter().map(|p| p.generation_today_mwh).sum()
    }
}
