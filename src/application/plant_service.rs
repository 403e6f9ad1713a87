// Plant service - Use case for listing plants
use crate::application::analysis_repository::AnalysisRepository;
use crate::domain::plant::Plant;
use std::sync::Arc;

#[derive(Clone)]
pub struct PlantService {
    repository: Arc<dyn AnalysisRepository>,
}

impl PlantService {
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_plants(&self) -> anyhow::Result<Vec<Plant>> {
        let ids = self.repository.list_plant_ids().await?;
        Ok(ids.into_iter().map(Plant::new).collect())
    }

    pub async fn find_plant(&self, plant_id: &str) -> anyhow::Result<Option<Plant>> {
        let plants = self.list_plants().await?;
        Ok(plants.into_iter().find(|p| p.id == plant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis_service::tests::FakeRepository;

    #[tokio::test]
    async fn test_list_and_find_plants() {
        let repository = Arc::new(FakeRepository {
            plant_ids: vec!["Solar_Park_North_".to_string(), "Desert_Ridge".to_string()],
            ..Default::default()
        });
        let service = PlantService::new(repository);

        let plants = service.list_plants().await.unwrap();
        assert_eq!(plants[0].name, "Solar Park North");

        let found = service.find_plant("Desert_Ridge").await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Desert Ridge".to_string()));
        assert!(service.find_plant("missing").await.unwrap().is_none());
    }
}
