// Plant domain model

#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub id: String,
    pub name: String,
}

impl Plant {
    pub fn new(id: String) -> Self {
        let name = Self::format_name(&id);
        Self { id, name }
    }

    fn format_name(id: &str) -> String {
        // "Solar_Park_North_" -> "Solar Park North"
        id.trim_end_matches('_').replace('_', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        let plant = Plant::new("Solar_Park_North_".to_string());
        assert_eq!(plant.name, "Solar Park North");

        let plant = Plant::new("Rooftop_12".to_string());
        assert_eq!(plant.name, "Rooftop 12");
    }
}
