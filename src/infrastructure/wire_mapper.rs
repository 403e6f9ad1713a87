// Mapper to convert domain models to wire types
use crate::domain::chart::ChartPoint;
use crate::domain::grid::cell_key;
use crate::domain::heatmap::HeatMap;
use crate::domain::plant::Plant;
use crate::infrastructure::wire::{ChartKind, WireCell, WireHeatMap, WirePlant, WirePoint};

pub fn plant_to_wire(plant: Plant) -> WirePlant {
    WirePlant {
        id: plant.id,
        name: plant.name,
    }
}

pub fn heat_map_to_wire(heat_map: &HeatMap) -> WireHeatMap {
    let cells = heat_map
        .cells()
        .map(|cell| WireCell {
            key: cell_key(cell.entity_id, cell.hour),
            entity_id: cell.entity_id.to_string(),
            hour: cell.hour.to_string(),
            value: cell.value,
            color: cell.color.as_str(),
        })
        .collect();

    WireHeatMap {
        entity_ids: heat_map.axes.entity_ids.clone(),
        time_slots: heat_map.axes.time_slots.clone(),
        min_value: heat_map.grid.min_value,
        max_value: heat_map.grid.max_value,
        cells,
    }
}

pub fn points_to_wire(points: Vec<ChartPoint>) -> Vec<WirePoint> {
    points
        .into_iter()
        .map(|p| WirePoint {
            label: p.label,
            hour: p.hour,
            minute: p.minute,
            value: p.value,
        })
        .collect()
}

pub fn chart_kind(kind: &str) -> ChartKind {
    match kind {
        "area" => ChartKind::Area,
        _ => ChartKind::Line,
    }
}
