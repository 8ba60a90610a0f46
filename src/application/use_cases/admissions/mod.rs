pub mod create_admission;
pub mod get_admission;
pub mod list_admissions;

#[cfg(test)]
mod tests {
    use super::create_admission::CreateAdmission;
    use super::get_admission::GetAdmission;
    use super::list_admissions::ListAdmissions;
    use crate::application::forms::admission::AdmissionForm;
    use crate::application::forms::{Form, FormData, UploadedFile};
    use crate::application::ports::admission_repository::AdmissionRepository;
    use crate::domain::admissions::admission::{AdmissionDetails, AdmissionRecord};
    use crate::infrastructure::memory::InMemoryAdmissionRepository;
    use crate::infrastructure::storage::FsUploadStore;
    use async_trait::async_trait;
    use uuid::Uuid;

    struct UnavailableRepository;

    #[async_trait]
    impl AdmissionRepository for UnavailableRepository {
        async fn insert(&self, _: Uuid, _: &AdmissionDetails) -> anyhow::Result<AdmissionRecord> {
            anyhow::bail!("connection refused")
        }
        async fn get(&self, _: Uuid) -> anyhow::Result<Option<AdmissionRecord>> {
            Ok(None)
        }
        async fn list_by_creator(&self, _: Uuid) -> anyhow::Result<Vec<AdmissionRecord>> {
            Ok(Vec::new())
        }
    }

    fn form() -> AdmissionForm {
        AdmissionForm::validate(
            FormData::new()
                .with_field("school_name", "ZP School")
                .with_field("first_name_marathi", "सीता")
                .with_field("last_name_marathi", "पाटील")
                .with_field("father_name", "राम")
                .with_field("mother_name", "गीता")
                .with_field("parent_full_name", "राम पाटील")
                .with_field("address", "वाई")
                .with_field("is_minority", "y")
                .with_file("student_photo", UploadedFile::new("kid.png", vec![1, 2])),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_stores_photo_and_scopes_reads_to_creator() {
        let tmp = tempfile::TempDir::new().unwrap();
        let uploads = FsUploadStore::new(tmp.path());
        let repo = InMemoryAdmissionRepository::default();
        let owner = Uuid::new_v4();

        let record = CreateAdmission {
            repo: &repo,
            uploads: &uploads,
        }
        .execute(owner, form())
        .await
        .unwrap();
        let photo = record.details.student_photo.clone().unwrap();
        assert!(photo.starts_with("admissions/"));
        assert!(tmp.path().join(&photo).exists());
        assert!(record.details.parent_photo.is_none());
        assert!(record.details.is_minority);

        let get = GetAdmission { repo: &repo };
        assert!(get.execute(owner, record.id).await.unwrap().is_some());
        assert!(get.execute(Uuid::new_v4(), record.id).await.unwrap().is_none());

        let list = ListAdmissions { repo: &repo }.execute(owner).await.unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn failed_insert_removes_stored_photos() {
        let tmp = tempfile::TempDir::new().unwrap();
        let uploads = FsUploadStore::new(tmp.path());
        let mut form = form();
        form.parent_photo = Some(UploadedFile::new("dad.jpg", vec![3]));

        let res = CreateAdmission {
            repo: &UnavailableRepository,
            uploads: &uploads,
        }
        .execute(Uuid::new_v4(), form)
        .await;
        assert!(res.is_err());

        let dir = tmp.path().join("admissions");
        let left = std::fs::read_dir(&dir).map(|d| d.count()).unwrap_or(0);
        assert_eq!(left, 0);
    }
}
