//! Teacher service implementation.

use crate::dto::{TeacherFiltersDto, TeacherInsertDto, TeacherReadOnlyDto, TeacherUpdateDto};
use crate::mappers::{
    map_to_criteria, map_to_read_only_dto, map_to_teacher, map_update_to_teacher,
    teachers_to_read_only_dtos,
};
use crate::teacher_service::TeacherService;
use async_trait::async_trait;
use schoolapp_core::{Page, PageRequest, SchoolError, SchoolResult, TeacherId, ValidateExt};
use schoolapp_repository::TeacherDao;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Teacher service backed by a [`TeacherDao`].
#[derive(Component)]
#[shaku(interface = TeacherService)]
pub struct TeacherServiceImpl {
    #[shaku(inject)]
    teacher_dao: Arc<dyn TeacherDao>,
}

impl TeacherServiceImpl {
    /// Creates a new teacher service.
    #[must_use]
    pub fn new(teacher_dao: Arc<dyn TeacherDao>) -> Self {
        Self { teacher_dao }
    }
}

#[async_trait]
impl TeacherService for TeacherServiceImpl {
    async fn insert_teacher(&self, dto: TeacherInsertDto) -> SchoolResult<TeacherReadOnlyDto> {
        debug!("Inserting teacher with vat: {}", dto.vat);

        dto.validate_request()?;

        if self.teacher_dao.find_by_vat(&dto.vat).await?.is_some() {
            return Err(SchoolError::Conflict(format!(
                "VAT '{}' already exists",
                dto.vat
            )));
        }

        let saved = self.teacher_dao.insert(map_to_teacher(dto)).await?;

        info!("Teacher created: {:?}", saved.id);
        Ok(map_to_read_only_dto(saved))
    }

    async fn update_teacher(&self, dto: TeacherUpdateDto) -> SchoolResult<TeacherReadOnlyDto> {
        debug!("Updating teacher: {}", dto.id);

        dto.validate_request()?;

        if let Some(owner) = self.teacher_dao.find_by_vat(&dto.vat).await? {
            if owner.id != Some(dto.id) {
                return Err(SchoolError::Conflict(format!(
                    "VAT '{}' belongs to another teacher",
                    dto.vat
                )));
            }
        }

        let updated = self.teacher_dao.update(map_update_to_teacher(dto)).await?;

        info!("Teacher updated: {:?}", updated.id);
        Ok(map_to_read_only_dto(updated))
    }

    async fn delete_teacher(&self, id: TeacherId) -> SchoolResult<()> {
        debug!("Deleting teacher: {}", id);
        self.teacher_dao.delete(id).await
    }

    async fn get_teacher(&self, id: TeacherId) -> SchoolResult<TeacherReadOnlyDto> {
        debug!("Getting teacher: {}", id);

        let teacher = self
            .teacher_dao
            .get_by_id(id)
            .await?
            .ok_or_else(|| SchoolError::not_found("Teacher", id))?;

        Ok(map_to_read_only_dto(teacher))
    }

    async fn get_all_teachers(&self) -> SchoolResult<Vec<TeacherReadOnlyDto>> {
        debug!("Listing all teachers");
        Ok(teachers_to_read_only_dtos(self.teacher_dao.get_all().await?))
    }

    async fn get_filtered_teachers(
        &self,
        filters: &TeacherFiltersDto,
    ) -> SchoolResult<Vec<TeacherReadOnlyDto>> {
        debug!("Listing teachers by {:?}", filters);

        let criteria = map_to_criteria(filters);
        Ok(teachers_to_read_only_dtos(
            self.teacher_dao.get_by_criteria(&criteria).await?,
        ))
    }

    async fn get_paginated_teachers(
        &self,
        filters: &TeacherFiltersDto,
        page: Option<u32>,
        size: Option<u32>,
    ) -> SchoolResult<Page<TeacherReadOnlyDto>> {
        debug!("Listing teachers by {:?}, page: {:?}, size: {:?}", filters, page, size);

        let criteria = map_to_criteria(filters);
        let total = self.teacher_dao.get_count_by_criteria(&criteria).await?;
        let teachers = self
            .teacher_dao
            .get_by_criteria_paginated(&criteria, page, size)
            .await?;

        let page = match PageRequest::from_parts(page, size) {
            Some(request) => Page::new(teachers, request.page, request.size, total),
            None => Page::unpaged(teachers),
        };
        Ok(page.map(map_to_read_only_dto))
    }

    async fn count_filtered_teachers(&self, filters: &TeacherFiltersDto) -> SchoolResult<u64> {
        self.teacher_dao
            .get_count_by_criteria(&map_to_criteria(filters))
            .await
    }
}

impl std::fmt::Debug for TeacherServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeacherServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolapp_core::{Entity, Teacher};
    use schoolapp_repository::{Criteria, GenericDao, Value};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory teacher DAO for testing.
    ///
    /// Filters are matched as prefixes on the three text fields.
    #[derive(Default)]
    struct InMemoryTeacherDao {
        teachers: Mutex<BTreeMap<i64, Teacher>>,
    }

    impl InMemoryTeacherDao {
        fn with_teachers(teachers: Vec<Teacher>) -> Self {
            let dao = Self::default();
            for (i, teacher) in teachers.into_iter().enumerate() {
                let id = TeacherId::new(i as i64 + 1);
                dao.teachers.lock().unwrap().insert(id.into_inner(), teacher.with_id(id));
            }
            dao
        }

        fn matching(&self, criteria: &Criteria) -> Vec<Teacher> {
            self.teachers
                .lock()
                .unwrap()
                .values()
                .filter(|t| {
                    criteria.iter().all(|(path, value)| {
                        let field = match path {
                            "firstname" => &t.firstname,
                            "lastname" => &t.lastname,
                            "vat" => &t.vat,
                            _ => return false,
                        };
                        field.starts_with(&value.to_string())
                    })
                })
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl GenericDao<Teacher> for InMemoryTeacherDao {
        async fn insert(&self, teacher: Teacher) -> SchoolResult<Teacher> {
            let mut teachers = self.teachers.lock().unwrap();
            let next = teachers.keys().next_back().map_or(1, |id| id + 1);
            let saved = teacher.with_id(TeacherId::new(next));
            teachers.insert(next, saved.clone());
            Ok(saved)
        }

        async fn update(&self, teacher: Teacher) -> SchoolResult<Teacher> {
            let id = teacher
                .id
                .ok_or_else(|| SchoolError::validation("missing id"))?;
            let mut teachers = self.teachers.lock().unwrap();
            match teachers.get_mut(&id.into_inner()) {
                Some(stored) => {
                    *stored = teacher.clone();
                    Ok(teacher)
                }
                None => Err(SchoolError::not_found("Teacher", id)),
            }
        }

        async fn delete(&self, id: TeacherId) -> SchoolResult<()> {
            self.teachers.lock().unwrap().remove(&id.into_inner());
            Ok(())
        }

        async fn get_by_id(&self, id: TeacherId) -> SchoolResult<Option<Teacher>> {
            Ok(self.teachers.lock().unwrap().get(&id.into_inner()).cloned())
        }

        async fn count(&self) -> SchoolResult<u64> {
            Ok(self.teachers.lock().unwrap().len() as u64)
        }

        async fn get_count_by_criteria(&self, criteria: &Criteria) -> SchoolResult<u64> {
            Ok(self.matching(criteria).len() as u64)
        }

        async fn get_all(&self) -> SchoolResult<Vec<Teacher>> {
            Ok(self.teachers.lock().unwrap().values().cloned().collect())
        }

        async fn get_by_criteria(&self, criteria: &Criteria) -> SchoolResult<Vec<Teacher>> {
            Ok(self.matching(criteria))
        }

        async fn get_by_criteria_paginated(
            &self,
            criteria: &Criteria,
            page: Option<u32>,
            size: Option<u32>,
        ) -> SchoolResult<Vec<Teacher>> {
            let all = self.matching(criteria);
            Ok(match PageRequest::from_parts(page, size) {
                Some(request) => all
                    .into_iter()
                    .skip(request.offset() as usize)
                    .take(request.limit() as usize)
                    .collect(),
                None => all,
            })
        }

        async fn find_by_field(&self, field: &str, value: Value) -> SchoolResult<Option<Teacher>> {
            let value = value.to_string();
            Ok(self
                .teachers
                .lock()
                .unwrap()
                .values()
                .find(|t| match field {
                    "vat" => t.vat == value,
                    "firstname" => t.firstname == value,
                    "lastname" => t.lastname == value,
                    _ => false,
                })
                .cloned())
        }
    }

    #[async_trait]
    impl TeacherDao for InMemoryTeacherDao {
        async fn find_by_vat(&self, vat: &str) -> SchoolResult<Option<Teacher>> {
            self.find_by_field("vat", Value::from(vat)).await
        }
    }

    fn service_with(teachers: Vec<Teacher>) -> TeacherServiceImpl {
        TeacherServiceImpl::new(Arc::new(InMemoryTeacherDao::with_teachers(teachers)))
    }

    fn sample_teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("111111111", "Anna", "Papadopoulou"),
            Teacher::new("222222222", "Andreas", "Papas"),
            Teacher::new("333333333", "Maria", "Georgiou"),
        ]
    }

    #[tokio::test]
    async fn test_insert_teacher() {
        let service = service_with(vec![]);

        let dto = service
            .insert_teacher(TeacherInsertDto::new("123456789", "Anna", "Pappa"))
            .await
            .unwrap();

        assert_eq!(dto.id, Some(TeacherId::new(1)));
        assert_eq!(dto.vat, "123456789");
        assert_eq!(dto.firstname, "Anna");
        assert_eq!(dto.lastname, "Pappa");
    }

    #[tokio::test]
    async fn test_insert_invalid_dto_is_rejected() {
        let service = service_with(vec![]);

        let result = service
            .insert_teacher(TeacherInsertDto::new("123", "Anna", "Pappa"))
            .await;

        assert!(matches!(result, Err(SchoolError::Validation(_))));
        assert!(service.get_all_teachers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_duplicate_vat_is_conflict() {
        let service = service_with(sample_teachers());

        let result = service
            .insert_teacher(TeacherInsertDto::new("111111111", "Nikos", "Pappas"))
            .await;

        assert!(matches!(result, Err(SchoolError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_teacher() {
        let service = service_with(sample_teachers());

        let dto = service
            .update_teacher(TeacherUpdateDto::new(
                TeacherId::new(3),
                "333333333",
                "Maria",
                "Ioannou",
            ))
            .await
            .unwrap();
        assert_eq!(dto.lastname, "Ioannou");

        let fetched = service.get_teacher(TeacherId::new(3)).await.unwrap();
        assert_eq!(fetched.lastname, "Ioannou");
    }

    #[tokio::test]
    async fn test_update_to_foreign_vat_is_conflict() {
        let service = service_with(sample_teachers());

        let result = service
            .update_teacher(TeacherUpdateDto::new(
                TeacherId::new(3),
                "111111111",
                "Maria",
                "Georgiou",
            ))
            .await;

        assert!(matches!(result, Err(SchoolError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_teacher_is_not_found() {
        let service = service_with(vec![]);

        let result = service
            .update_teacher(TeacherUpdateDto::new(
                TeacherId::new(9),
                "999999999",
                "Maria",
                "Georgiou",
            ))
            .await;

        assert!(matches!(result, Err(SchoolError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_teacher_is_not_found() {
        let service = service_with(vec![]);

        match service.get_teacher(TeacherId::new(1)).await {
            Err(SchoolError::NotFound { resource_type, id }) => {
                assert_eq!(resource_type, "Teacher");
                assert_eq!(id, "1");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_teacher_and_missing() {
        let service = service_with(sample_teachers());

        service.delete_teacher(TeacherId::new(1)).await.unwrap();
        service.delete_teacher(TeacherId::new(1)).await.unwrap();

        assert_eq!(service.get_all_teachers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_filtered_teachers_ignore_empty_filters() {
        let service = service_with(sample_teachers());

        let filters = TeacherFiltersDto::default().with_firstname("").with_lastname("Pap");
        let found = service.get_filtered_teachers(&filters).await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(service.count_filtered_teachers(&filters).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_paginated_teachers() {
        let service = service_with(sample_teachers());
        let filters = TeacherFiltersDto::default();

        let page = service
            .get_paginated_teachers(&filters, Some(1), Some(2))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.content[0].vat, "333333333");

        let unpaged = service
            .get_paginated_teachers(&filters, None, Some(2))
            .await
            .unwrap();
        assert_eq!(unpaged.len(), 3);
        assert_eq!(unpaged.total_pages(), 1);
    }
}
