//! Service catalog — use-cases for managing airport services.

use serde::Serialize;

use airserv_domain::equipment::Equipment;
use airserv_domain::error::{AirservError, NotFoundError};
use airserv_domain::id::ServiceId;
use airserv_domain::service::{Service, ServiceSummary, ServiceUpdate};
use airserv_domain::status::OperationalStatus;
use airserv_domain::time::now;

use crate::ports::{EquipmentRepository, ServiceRepository};

/// A service with all of its equipment, ordered by name.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub equipments: Vec<Equipment>,
}

/// Application service for service CRUD and explicit status overrides.
pub struct ServiceCatalog<S, E> {
    repo: S,
    equipments: E,
}

fn not_found(id: ServiceId) -> AirservError {
    NotFoundError {
        entity: "Service",
        id: id.to_string(),
    }
    .into()
}

impl<S, E> ServiceCatalog<S, E>
where
    S: ServiceRepository + Send + Sync,
    E: EquipmentRepository + Send + Sync,
{
    /// Create a new catalog backed by the given repositories.
    pub fn new(repo: S, equipments: E) -> Self {
        Self { repo, equipments }
    }

    /// Create a new service after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, service), fields(service_name = %service.name))]
    pub async fn create_service(&self, service: Service) -> Result<Service, AirservError> {
        service.validate()?;
        self.repo.create(service).await
    }

    /// Look up a service by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] when no service with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_service(&self, id: ServiceId) -> Result<Service, AirservError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Look up a service together with its equipment.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] when no service with `id` exists,
    /// or a storage error from the repositories.
    pub async fn get_service_detail(&self, id: ServiceId) -> Result<ServiceDetail, AirservError> {
        let service = self.get_service(id).await?;
        let equipments = self.equipments.find_by_service(id).await?;
        Ok(ServiceDetail {
            service,
            equipments,
        })
    }

    /// List all services with their equipment count, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_services(&self) -> Result<Vec<ServiceSummary>, AirservError> {
        self.repo.get_summaries().await
    }

    /// Apply an administrative edit to an existing service.
    ///
    /// Only the metadata is rewritten, so a status reconciled while the edit
    /// was in flight survives. A status set here is an override: the next
    /// reconciliation replaces it if it disagrees with the equipment.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] if the service does not exist,
    /// [`AirservError::Validation`] if the edit breaks invariants, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_service(
        &self,
        id: ServiceId,
        update: ServiceUpdate,
    ) -> Result<Service, AirservError> {
        let at = now();
        let status = update.status;
        let mut service = self.get_service(id).await?;
        service.apply(update, at);
        service.validate()?;
        self.repo.update(service).await?;
        if let Some(status) = status
            && !self.repo.set_status(id, status, at).await?
        {
            return Err(not_found(id));
        }
        self.get_service(id).await
    }

    /// Overwrite only the status of a service.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] if the service does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn override_status(
        &self,
        id: ServiceId,
        status: OperationalStatus,
    ) -> Result<Service, AirservError> {
        if !self.repo.set_status(id, status, now()).await? {
            return Err(not_found(id));
        }
        self.get_service(id).await
    }

    /// Delete a service and, through the store, all of its equipment.
    /// Returns the deleted service.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] if the service does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_service(&self, id: ServiceId) -> Result<Service, AirservError> {
        let service = self.get_service(id).await?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::status_coordinator::StatusCoordinator;
    use crate::testing::InMemoryStore;
    use airserv_domain::error::ValidationError;
    use airserv_domain::time::Timestamp;
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn make_catalog() -> (ServiceCatalog<InMemoryStore, InMemoryStore>, InMemoryStore) {
        let store = InMemoryStore::default();
        (ServiceCatalog::new(store.clone(), store.clone()), store)
    }

    fn wifi() -> Service {
        Service::builder().name("WiFi").icon("📶").build().unwrap()
    }

    fn equipment(service_id: ServiceId, name: &str) -> Equipment {
        Equipment::builder()
            .service_id(service_id)
            .name(name)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_service_when_valid() {
        let (catalog, _) = make_catalog();
        let service = wifi();
        let id = service.id;

        catalog.create_service(service).await.unwrap();

        let fetched = catalog.get_service(id).await.unwrap();
        assert_eq!(fetched.name, "WiFi");
        assert_eq!(fetched.status, OperationalStatus::Active);
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_empty() {
        let (catalog, _) = make_catalog();
        let mut service = wifi();
        service.name = String::new();

        let result = catalog.create_service(service).await;
        assert!(matches!(
            result,
            Err(AirservError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_service_missing() {
        let (catalog, _) = make_catalog();
        let result = catalog.get_service(ServiceId::new()).await;
        assert!(matches!(result, Err(AirservError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_include_equipment_sorted_by_name_in_detail() {
        let (catalog, store) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();
        store.insert_equipment(equipment(service.id, "AP-2"));
        store.insert_equipment(equipment(service.id, "AP-1"));

        let detail = catalog.get_service_detail(service.id).await.unwrap();

        let names: Vec<_> = detail.equipments.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["AP-1", "AP-2"]);
    }

    #[tokio::test]
    async fn should_count_equipment_when_listing() {
        let (catalog, store) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();
        catalog
            .create_service(Service::builder().name("CCTV").build().unwrap())
            .await
            .unwrap();
        store.insert_equipment(equipment(service.id, "AP-1"));

        let all = catalog.list_services().await.unwrap();

        assert_eq!(all.len(), 2);
        let wifi = all.iter().find(|s| s.service.id == service.id).unwrap();
        assert_eq!(wifi.equipment_count, 1);
    }

    #[tokio::test]
    async fn should_update_service_fields() {
        let (catalog, _) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();

        let updated = catalog
            .update_service(
                service.id,
                ServiceUpdate {
                    name: "Public WiFi".to_string(),
                    description: Some("Passenger hotspots".to_string()),
                    ..ServiceUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Public WiFi");
        assert_eq!(updated.icon, "📶");
        assert_eq!(updated.description, "Passenger hotspots");
    }

    /// Service repository that lets an equipment flip commit and reconcile
    /// right after the first service read.
    struct FlipAfterRead {
        store: InMemoryStore,
        coordinator: Arc<StatusCoordinator<InMemoryStore, InMemoryStore>>,
        flipped: AtomicBool,
    }

    impl ServiceRepository for FlipAfterRead {
        fn create(&self, service: Service) -> impl Future<Output = Result<Service, AirservError>> + Send {
            ServiceRepository::create(&self.store, service)
        }

        fn get_by_id(
            &self,
            id: ServiceId,
        ) -> impl Future<Output = Result<Option<Service>, AirservError>> + Send {
            let store = self.store.clone();
            let coordinator = Arc::clone(&self.coordinator);
            let flip = !self.flipped.swap(true, Ordering::SeqCst);
            async move {
                let snapshot = ServiceRepository::get_by_id(&store, id).await?;
                if flip {
                    store.insert_equipment(
                        Equipment::builder()
                            .service_id(id)
                            .name("AP-1")
                            .status(OperationalStatus::Inactive)
                            .build()?,
                    );
                    coordinator.reconcile(id).await?;
                }
                Ok::<_, AirservError>(snapshot)
            }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, AirservError>> + Send {
            ServiceRepository::get_all(&self.store)
        }

        fn get_summaries(
            &self,
        ) -> impl Future<Output = Result<Vec<ServiceSummary>, AirservError>> + Send {
            self.store.get_summaries()
        }

        fn update(&self, service: Service) -> impl Future<Output = Result<Service, AirservError>> + Send {
            ServiceRepository::update(&self.store, service)
        }

        fn delete(&self, id: ServiceId) -> impl Future<Output = Result<bool, AirservError>> + Send {
            ServiceRepository::delete(&self.store, id)
        }

        fn get_status(
            &self,
            id: ServiceId,
        ) -> impl Future<Output = Result<Option<OperationalStatus>, AirservError>> + Send {
            self.store.get_status(id)
        }

        fn set_status(
            &self,
            id: ServiceId,
            status: OperationalStatus,
            at: Timestamp,
        ) -> impl Future<Output = Result<bool, AirservError>> + Send {
            self.store.set_status(id, status, at)
        }
    }

    #[tokio::test]
    async fn should_keep_reconciled_status_when_renaming_concurrently() {
        let store = InMemoryStore::default();
        let service = wifi();
        let id = service.id;
        store.insert_service(service);
        let repo = FlipAfterRead {
            store: store.clone(),
            coordinator: Arc::new(StatusCoordinator::new(store.clone(), store.clone())),
            flipped: AtomicBool::new(false),
        };
        let catalog = ServiceCatalog::new(repo, store.clone());

        let renamed = catalog
            .update_service(
                id,
                ServiceUpdate {
                    name: "WiFi T2".to_string(),
                    ..ServiceUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(renamed.name, "WiFi T2");
        assert_eq!(renamed.status, OperationalStatus::Inactive);
        assert_eq!(store.service(id).unwrap().status, OperationalStatus::Inactive);
    }

    #[tokio::test]
    async fn should_apply_status_override_given_with_edit() {
        let (catalog, store) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();

        let updated = catalog
            .update_service(
                service.id,
                ServiceUpdate {
                    name: "WiFi".to_string(),
                    status: Some(OperationalStatus::Inactive),
                    ..ServiceUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OperationalStatus::Inactive);
        assert_eq!(store.service(service.id).unwrap().status, OperationalStatus::Inactive);
    }

    #[tokio::test]
    async fn should_reject_update_with_blank_name() {
        let (catalog, _) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();

        let result = catalog
            .update_service(service.id, ServiceUpdate::default())
            .await;

        assert!(matches!(result, Err(AirservError::Validation(_))));
        assert_eq!(catalog.get_service(service.id).await.unwrap().name, "WiFi");
    }

    #[tokio::test]
    async fn should_override_status() {
        let (catalog, _) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();

        let updated = catalog
            .override_status(service.id, OperationalStatus::Inactive)
            .await
            .unwrap();

        assert_eq!(updated.status, OperationalStatus::Inactive);
    }

    #[tokio::test]
    async fn should_return_not_found_when_overriding_missing_service() {
        let (catalog, _) = make_catalog();
        let result = catalog
            .override_status(ServiceId::new(), OperationalStatus::Inactive)
            .await;
        assert!(matches!(result, Err(AirservError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_service_and_its_equipment() {
        let (catalog, store) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();
        let ap = equipment(service.id, "AP-1");
        store.insert_equipment(ap.clone());

        let deleted = catalog.delete_service(service.id).await.unwrap();

        assert_eq!(deleted.id, service.id);
        assert!(matches!(
            catalog.get_service(service.id).await,
            Err(AirservError::NotFound(_))
        ));
        assert!(EquipmentRepository::get_by_id(&store, ap.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_service() {
        let (catalog, _) = make_catalog();
        let result = catalog.delete_service(ServiceId::new()).await;
        assert!(matches!(result, Err(AirservError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_serialize_detail_as_flat_service_with_equipments() {
        let (catalog, store) = make_catalog();
        let service = catalog.create_service(wifi()).await.unwrap();
        store.insert_equipment(equipment(service.id, "AP-1"));

        let detail = catalog.get_service_detail(service.id).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["name"], "WiFi");
        assert_eq!(json["status"], "active");
        assert_eq!(json["equipments"][0]["name"], "AP-1");
        assert!(json.get("service").is_none());
    }
}
