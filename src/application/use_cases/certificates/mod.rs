pub mod create_certificate;
pub mod get_certificate;

#[cfg(test)]
mod tests {
    use super::create_certificate::CreateCertificate;
    use super::get_certificate::{GetCertificate, ListCertificates};
    use crate::domain::certificates::certificate::{CertificateDetails, CertificateKind};
    use crate::infrastructure::memory::InMemoryCertificateRepository;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn details() -> CertificateDetails {
        CertificateDetails {
            student_name: "सीता पाटील".into(),
            academic_year: "2024-25".into(),
            class_standard: "5".into(),
            division: "A".into(),
            conduct: "चांगले".into(),
            caste: "मराठा".into(),
            birth_date: NaiveDate::from_ymd_opt(2014, 3, 9).unwrap(),
            birth_place: "सातारा".into(),
            school_place: "वाई".into(),
        }
    }

    #[tokio::test]
    async fn create_list_and_render() {
        let repo = InMemoryCertificateRepository::default();
        let owner = Uuid::new_v4();
        let create = CreateCertificate { repo: &repo };
        let bona = create
            .execute(owner, CertificateKind::Bonafide, &details())
            .await
            .unwrap();
        create
            .execute(owner, CertificateKind::Representation, &details())
            .await
            .unwrap();

        let list = ListCertificates { repo: &repo };
        assert_eq!(list.execute(owner, None).await.unwrap().len(), 2);
        assert_eq!(
            list.execute(owner, Some(CertificateKind::Bonafide))
                .await
                .unwrap()
                .len(),
            1
        );

        let get = GetCertificate { repo: &repo };
        let html = get.render(owner, bona.id).await.unwrap().unwrap();
        assert!(html.contains("सीता पाटील"));
        assert!(get.render(Uuid::new_v4(), bona.id).await.unwrap().is_none());
    }
}
