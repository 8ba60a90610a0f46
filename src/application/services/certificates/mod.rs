use htmlescape::encode_minimal as esc;

use crate::domain::certificates::certificate::{CertificateKind, CertificateRequest};

const STYLE: &str = "body{font-family:'Noto Sans Devanagari',sans-serif;max-width:48rem;margin:2rem auto;line-height:1.8}\
h1{text-align:center;font-size:1.4rem}\
table{width:100%;border-collapse:collapse}\
td{padding:.3rem .5rem;border-bottom:1px solid #ccc}\
.sign{margin-top:4rem;text-align:right}";

/// Renders a printable certificate. Every user-supplied value is HTML-escaped.
pub fn render_html(cert: &CertificateRequest) -> String {
    let d = &cert.details;
    let birth_date = d.birth_date.format("%d/%m/%Y").to_string();
    let rows = [
        ("विद्यार्थ्याचे पूर्ण नाव / Student Name", d.student_name.as_str()),
        ("शैक्षणिक वर्ष / Academic Year", d.academic_year.as_str()),
        ("इयत्ता / Class", d.class_standard.as_str()),
        ("तुकडी / Division", d.division.as_str()),
        ("वर्तन / Conduct", d.conduct.as_str()),
        ("जात / Caste", d.caste.as_str()),
        ("जन्मतारीख / Date of Birth", birth_date.as_str()),
        ("जन्मस्थान / Place of Birth", d.birth_place.as_str()),
    ];
    let mut table = String::new();
    for (label, value) in rows {
        table.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", label, esc(value)));
    }

    let statement = match cert.kind {
        CertificateKind::Bonafide => format!(
            "प्रमाणित करण्यात येते की {} हा/ही या शाळेचा/ची बोनाफाईड विद्यार्थी आहे. \
             This is to certify that {} is a bonafide student of this school for the academic year {}.",
            esc(&d.student_name),
            esc(&d.student_name),
            esc(&d.academic_year),
        ),
        CertificateKind::Representation => format!(
            "प्रमाणित करण्यात येते की {} या विद्यार्थ्यास शाळेचे प्रतिनिधित्व करण्याची परवानगी आहे. \
             This is to certify that {} is permitted to represent the school in the academic year {}.",
            esc(&d.student_name),
            esc(&d.student_name),
            esc(&d.academic_year),
        ),
    };

    format!(
        "<!DOCTYPE html><html lang=\"mr\"><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{style}</style></head><body><h1>{title}</h1><p>{statement}</p>\
         <table>{table}</table>\
         <p>स्थळ / Place: {place}<br>दिनांक / Date: {issued}<br>क्रमांक / No.: {id}</p>\
         <p class=\"sign\">मुख्याध्यापक / Headmaster</p></body></html>",
        title = cert.kind.title(),
        style = STYLE,
        statement = statement,
        table = table,
        place = esc(&d.school_place),
        issued = cert.created_at.format("%d/%m/%Y"),
        id = cert.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::certificates::certificate::CertificateDetails;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn cert(kind: CertificateKind, name: &str) -> CertificateRequest {
        CertificateRequest {
            id: Uuid::new_v4(),
            kind,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            details: CertificateDetails {
                student_name: name.into(),
                academic_year: "2024-25".into(),
                class_standard: "7".into(),
                division: "B".into(),
                conduct: "Good".into(),
                caste: "-".into(),
                birth_date: NaiveDate::from_ymd_opt(2012, 1, 31).unwrap(),
                birth_place: "Pune".into(),
                school_place: "Wai".into(),
            },
        }
    }

    #[test]
    fn escapes_user_text() {
        let html = render_html(&cert(CertificateKind::Bonafide, "<script>x</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn title_and_date_follow_kind() {
        let html = render_html(&cert(CertificateKind::Representation, "Asha"));
        assert!(html.contains("Representation Certificate"));
        assert!(html.contains("31/01/2012"));
        assert!(html.contains("permitted to represent"));
    }
}
