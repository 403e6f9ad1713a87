// Rule-based chatbot over the fleet snapshot
//
// Rules are tried in order and the first match answers. The last rule always matches.
use super::fleet::{FleetSnapshot, Priority};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Help,
    InverterStatus,
    PerformanceRatio,
    Generation,
    Maintenance,
    Inventory,
    Billing,
    SupplyChain,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub topic: Topic,
    pub text: String,
}

/// A lower-cased query with its words split out.
pub struct Query {
    text: String,
    words: Vec<String>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self { text, words }
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    pub fn has_word(&self, words: &[&str]) -> bool {
        self.words.iter().any(|w| words.contains(&w.as_str()))
    }
}

pub struct ChatRule {
    pub topic: Topic,
    matches: fn(&Query) -> bool,
    respond: fn(&FleetSnapshot) -> String,
}

impl ChatRule {
    pub fn new(
        topic: Topic,
        matches: fn(&Query) -> bool,
        respond: fn(&FleetSnapshot) -> String,
    ) -> Self {
        Self {
            topic,
            matches,
            respond,
        }
    }
}

pub struct ChatBot {
    fleet: FleetSnapshot,
    rules: Vec<ChatRule>,
}

impl ChatBot {
    pub fn new(fleet: FleetSnapshot) -> Self {
        Self {
            fleet,
            rules: default_rules(),
        }
    }

    pub fn with_rules(fleet: FleetSnapshot, rules: Vec<ChatRule>) -> Self {
        Self { fleet, rules }
    }

    pub fn respond(&self, text: &str) -> ChatReply {
        let query = Query::new(text);
        match self.rules.iter().find(|r| (r.matches)(&query)) {
            Some(rule) => ChatReply {
                topic: rule.topic,
                text: (rule.respond)(&self.fleet),
            },
            None => ChatReply {
                topic: Topic::Fallback,
                text: fallback(&self.fleet),
            },
        }
    }
}

impl Default for ChatBot {
    fn default() -> Self {
        Self::new(FleetSnapshot::synthetic())
    }
}

pub fn default_rules() -> Vec<ChatRule> {
    vec![
        ChatRule::new(
            Topic::Greeting,
            |q| q.has_word(&["hello", "hi", "hey", "morning"]),
            |_| "Hello! Ask me about generation, inverters, maintenance, inventory, billing or shipments.".to_string(),
        ),
        ChatRule::new(
            Topic::Help,
            |q| q.has_word(&["help"]) || q.contains_any(&["what can you"]),
            |_| fallback_topics().to_string(),
        ),
        ChatRule::new(
            Topic::InverterStatus,
            |q| q.contains_any(&["inverter"]),
            inverter_status,
        ),
        ChatRule::new(
            Topic::PerformanceRatio,
            |q| q.contains_any(&["performance", "ratio"]) || q.has_word(&["pr"]),
            performance_ratio,
        ),
        ChatRule::new(
            Topic::Generation,
            |q| q.contains_any(&["generation", "energy", "produc", "output", "mwh"]),
            generation,
        ),
        ChatRule::new(
            Topic::Maintenance,
            |q| q.contains_any(&["maintenance", "ticket", "repair", "fault"]),
            maintenance,
        ),
        ChatRule::new(
            Topic::Inventory,
            |q| q.contains_any(&["inventory", "stock", "spare", "parts"]),
            inventory,
        ),
        ChatRule::new(
            Topic::Billing,
            |q| q.contains_any(&["bill", "invoice", "payment", "revenue"]),
            billing,
        ),
        ChatRule::new(
            Topic::SupplyChain,
            |q| q.contains_any(&["supply", "shipment", "deliver", "order"]),
            supply_chain,
        ),
        ChatRule::new(Topic::Fallback, |_| true, fallback),
    ]
}

fn inverter_status(fleet: &FleetSnapshot) -> String {
    let online: u32 = fleet.plants.iter().map(|p| p.inverters_online).sum();
    let total: u32 = fleet.plants.iter().map(|p| p.inverters_total).sum();
    let degraded: Vec<String> = fleet
        .plants
        .iter()
        .filter(|p| p.inverters_online < p.inverters_total)
        .map(|p| format!("{} ({} offline)", p.name, p.inverters_total - p.inverters_online))
        .collect();

    if degraded.is_empty() {
        format!("All {} inverters are online.", total)
    } else {
        format!(
            "{} of {} inverters are online. Offline units at: {}.",
            online,
            total,
            degraded.join(", ")
        )
    }
}

fn performance_ratio(fleet: &FleetSnapshot) -> String {
    let lines: Vec<String> = fleet
        .plants
        .iter()
        .map(|p| format!("{}: {:.0}%", p.name, p.performance_ratio * 100.0))
        .collect();
    format!("Performance ratio today - {}.", lines.join(", "))
}

fn generation(fleet: &FleetSnapshot) -> String {
    let best = fleet
        .plants
        .iter()
        .max_by(|a, b| a.generation_today_mwh.total_cmp(&b.generation_today_mwh));

    let mut text = format!(
        "The fleet generated {:.1} MWh today across {:.1} MW of capacity.",
        fleet.total_generation_mwh(),
        fleet.total_capacity_mw()
    );
    if let Some(best) = best {
        text.push_str(&format!(
            " Top producer: {} with {:.1} MWh.",
            best.name, best.generation_today_mwh
        ));
    }
    text
}

fn maintenance(fleet: &FleetSnapshot) -> String {
    let mut tickets: Vec<_> = fleet.tickets.iter().collect();
    tickets.sort_by_key(|t| std::cmp::Reverse(t.priority));

    let lines: Vec<String> = tickets
        .iter()
        .map(|t| format!("{} at {} [{}]: {}", t.id, t.plant, t.priority.as_str(), t.summary))
        .collect();
    let urgent = tickets.iter().filter(|t| t.priority == Priority::High).count();

    format!(
        "There are {} open maintenance tickets ({} high priority). {}.",
        tickets.len(),
        urgent,
        lines.join("; ")
    )
}

fn inventory(fleet: &FleetSnapshot) -> String {
    let low: Vec<String> = fleet
        .inventory
        .iter()
        .filter(|i| i.needs_reorder())
        .map(|i| format!("{} ({} on hand, reorder at {})", i.part, i.on_hand, i.reorder_level))
        .collect();

    if low.is_empty() {
        format!("All {} tracked parts are above reorder level.", fleet.inventory.len())
    } else {
        format!("Parts needing reorder: {}.", low.join(", "))
    }
}

fn billing(fleet: &FleetSnapshot) -> String {
    let outstanding: Vec<_> = fleet.invoices.iter().filter(|i| !i.paid).collect();
    let due: f64 = outstanding.iter().map(|i| i.amount_usd).sum();

    if outstanding.is_empty() {
        "All invoices are paid.".to_string()
    } else {
        let ids: Vec<String> = outstanding
            .iter()
            .map(|i| format!("{} ({})", i.id, i.customer))
            .collect();
        format!(
            "{} unpaid invoice(s) totalling ${:.2}: {}.",
            outstanding.len(),
            due,
            ids.join(", ")
        )
    }
}

fn supply_chain(fleet: &FleetSnapshot) -> String {
    let lines: Vec<String> = fleet
        .shipments
        .iter()
        .map(|s| {
            let status = if s.delayed { "delayed" } else { "on time" };
            format!("{} {} - ETA {} days ({})", s.id, s.contents, s.eta_days, status)
        })
        .collect();
    format!("Inbound shipments: {}.", lines.join("; "))
}

fn fallback_topics() -> &'static str {
    "I can answer questions about generation, performance ratio, inverter status, maintenance tickets, inventory, billing and shipments."
}

fn fallback(_: &FleetSnapshot) -> String {
    format!("Sorry, I didn't understand that. {}", fallback_topics())
}
