//! In-memory port implementations shared by the use-case tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use airserv_domain::activity::ActivityLogEntry;
use airserv_domain::equipment::Equipment;
use airserv_domain::error::{AirservError, NotFoundError};
use airserv_domain::id::{EquipmentId, ServiceId};
use airserv_domain::service::{Service, ServiceSummary};
use airserv_domain::status::OperationalStatus;
use airserv_domain::time::Timestamp;

use crate::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};

#[derive(Default)]
struct State {
    services: HashMap<ServiceId, Service>,
    equipments: HashMap<EquipmentId, Equipment>,
    activity: Vec<ActivityLogEntry>,
    status_writes: usize,
    fail_equipment_reads: bool,
    fail_activity_writes: bool,
}

/// One shared in-memory database; clones see the same data.
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

fn injected() -> AirservError {
    AirservError::Storage("injected failure".into())
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn insert_service(&self, service: Service) {
        self.lock().services.insert(service.id, service);
    }

    pub(crate) fn insert_equipment(&self, equipment: Equipment) {
        self.lock().equipments.insert(equipment.id, equipment);
    }

    pub(crate) fn service(&self, id: ServiceId) -> Option<Service> {
        self.lock().services.get(&id).cloned()
    }

    pub(crate) fn status_writes(&self) -> usize {
        self.lock().status_writes
    }

    pub(crate) fn activity(&self) -> Vec<ActivityLogEntry> {
        self.lock().activity.clone()
    }

    pub(crate) fn fail_equipment_reads(&self, fail: bool) {
        self.lock().fail_equipment_reads = fail;
    }

    pub(crate) fn fail_activity_writes(&self, fail: bool) {
        self.lock().fail_activity_writes = fail;
    }
}

impl ServiceRepository for InMemoryStore {
    fn create(&self, service: Service) -> impl Future<Output = Result<Service, AirservError>> + Send {
        self.lock().services.insert(service.id, service.clone());
        async { Ok(service) }
    }

    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<Service>, AirservError>> + Send {
        let result = self.lock().services.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, AirservError>> + Send {
        let mut result: Vec<Service> = self.lock().services.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        async { Ok(result) }
    }

    fn get_summaries(
        &self,
    ) -> impl Future<Output = Result<Vec<ServiceSummary>, AirservError>> + Send {
        let state = self.lock();
        let mut result: Vec<ServiceSummary> = state
            .services
            .values()
            .map(|service| ServiceSummary {
                service: service.clone(),
                equipment_count: state
                    .equipments
                    .values()
                    .filter(|e| e.service_id == service.id)
                    .count() as u64,
            })
            .collect();
        result.sort_by(|a, b| b.service.created_at.cmp(&a.service.created_at));
        async { Ok(result) }
    }

    fn update(&self, service: Service) -> impl Future<Output = Result<Service, AirservError>> + Send {
        let result = match self.lock().services.get_mut(&service.id) {
            Some(stored) => {
                stored.name.clone_from(&service.name);
                stored.icon.clone_from(&service.icon);
                stored.description.clone_from(&service.description);
                stored.updated_at = service.updated_at;
                Ok(service)
            }
            None => Err(NotFoundError {
                entity: "Service",
                id: service.id.to_string(),
            }
            .into()),
        };
        async move { result }
    }

    fn delete(&self, id: ServiceId) -> impl Future<Output = Result<bool, AirservError>> + Send {
        let mut state = self.lock();
        let removed = state.services.remove(&id).is_some();
        state.equipments.retain(|_, e| e.service_id != id);
        async move { Ok(removed) }
    }

    fn get_status(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<OperationalStatus>, AirservError>> + Send {
        let result = self.lock().services.get(&id).map(|s| s.status);
        async move { Ok(result) }
    }

    fn set_status(
        &self,
        id: ServiceId,
        status: OperationalStatus,
        at: Timestamp,
    ) -> impl Future<Output = Result<bool, AirservError>> + Send {
        let mut state = self.lock();
        let found = match state.services.get_mut(&id) {
            Some(service) => {
                service.status = status;
                service.updated_at = at;
                true
            }
            None => false,
        };
        if found {
            state.status_writes += 1;
        }
        async move { Ok(found) }
    }
}

impl EquipmentRepository for InMemoryStore {
    fn create(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, AirservError>> + Send {
        self.lock().equipments.insert(equipment.id, equipment.clone());
        async { Ok(equipment) }
    }

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, AirservError>> + Send {
        let result = self.lock().equipments.get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_service(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Vec<Equipment>, AirservError>> + Send {
        let mut result: Vec<Equipment> = self
            .lock()
            .equipments
            .values()
            .filter(|e| e.service_id == service_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, AirservError>> + Send {
        let result: Vec<Equipment> = self.lock().equipments.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, AirservError>> + Send {
        self.lock().equipments.insert(equipment.id, equipment.clone());
        async { Ok(equipment) }
    }

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, AirservError>> + Send {
        let removed = self.lock().equipments.remove(&id).is_some();
        async move { Ok(removed) }
    }

    fn list_statuses(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Vec<OperationalStatus>, AirservError>> + Send {
        let state = self.lock();
        let result = if state.fail_equipment_reads {
            Err(injected())
        } else {
            Ok(state
                .equipments
                .values()
                .filter(|e| e.service_id == service_id)
                .map(|e| e.status)
                .collect())
        };
        async { result }
    }
}

impl ActivityLogStore for InMemoryStore {
    fn record(
        &self,
        entry: ActivityLogEntry,
    ) -> impl Future<Output = Result<ActivityLogEntry, AirservError>> + Send {
        let mut state = self.lock();
        let result = if state.fail_activity_writes {
            Err(injected())
        } else {
            state.activity.push(entry.clone());
            Ok(entry)
        };
        async { result }
    }

    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActivityLogEntry>, AirservError>> + Send {
        let mut result = self.lock().activity.clone();
        result.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        result.truncate(limit);
        async { Ok(result) }
    }

    fn purge_before(
        &self,
        before: Timestamp,
    ) -> impl Future<Output = Result<usize, AirservError>> + Send {
        let mut state = self.lock();
        let len = state.activity.len();
        state.activity.retain(|e| e.recorded_at >= before);
        let purged = len - state.activity.len();
        async move { Ok(purged) }
    }
}
