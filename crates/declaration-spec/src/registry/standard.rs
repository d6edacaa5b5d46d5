use crate::key::QuestionId;
use crate::registry::disorder::DisorderDefinition;
use crate::registry::family::{FamilyCategory, FamilyDisease, FollowupField, FollowupSpec};
use crate::registry::field::FieldSpec;
use crate::registry::member::FamilyMember;
use crate::registry::question::{DetailKind, Question};
use crate::registry::Registry;

/// Affirmative option value used across the declaration.
pub const YES: &str = "כן";
/// Negative option value used across the declaration.
pub const NO: &str = "לא";

fn yes_no(key: &str, title: &str, reveals_on: Option<&str>) -> FieldSpec {
    FieldSpec {
        key: key.into(),
        title: title.to_string(),
        options: vec![YES.to_string(), NO.to_string()],
        reveals_on: reveals_on.map(str::to_string),
    }
}

fn disorder(id: &str, display_name: &str) -> DisorderDefinition {
    DisorderDefinition {
        id: id.into(),
        display_name: display_name.to_string(),
        fields: vec![
            FieldSpec {
                key: "timing".into(),
                title: "מתי אובחנה ההפרעה?".to_string(),
                options: vec![
                    "בחמש השנים האחרונות".to_string(),
                    "לפני למעלה מחמש שנים".to_string(),
                ],
                reveals_on: None,
            },
            yes_no("hospitalization", "האם נדרש אשפוז?", Some(YES)),
            yes_no("disability", "האם נקבעה נכות?", Some(YES)),
        ],
    }
}

fn disease(id: &str, display_name: &str, followup_trigger: bool) -> FamilyDisease {
    FamilyDisease {
        id: id.into(),
        display_name: display_name.to_string(),
        followup_trigger,
    }
}

impl Registry {
    /// The built-in declaration: 4 gate questions, 4 family members, 7
    /// disorders, 8 follow-up trigger diseases, and 2 category gates.
    pub fn standard() -> Self {
        Registry {
            id: "health-declaration".to_string(),
            title: "הצהרת בריאות".to_string(),
            version: "1.0.0".to_string(),
            questions: vec![
                Question {
                    id: QuestionId(1),
                    title: "הפרעות נפש".to_string(),
                    prompt: "האם מי מבני המשפחה אובחן או טופל בגין הפרעה נפשית?".to_string(),
                    members: true,
                    detail: DetailKind::Disorders,
                },
                Question {
                    id: QuestionId(2),
                    title: "מחלות תורשתיות".to_string(),
                    prompt: "האם קיימות במשפחה מחלות תורשתיות או מומים מולדים?".to_string(),
                    members: true,
                    detail: DetailKind::FamilyHistory,
                },
                Question {
                    id: QuestionId(3),
                    title: "מחלות כרוניות".to_string(),
                    prompt: "האם מי מבני המשפחה חולה במחלה כרונית?".to_string(),
                    members: true,
                    detail: DetailKind::Simple {
                        fields: vec![yes_no("in_treatment", "האם נמצא בטיפול כיום?", Some(YES))],
                    },
                },
                Question {
                    id: QuestionId(4),
                    title: "אשפוזים".to_string(),
                    prompt: "האם מי מבני המשפחה אושפז בחמש השנים האחרונות?".to_string(),
                    members: true,
                    detail: DetailKind::Simple {
                        fields: vec![yes_no("fully_recovered", "האם החלים לחלוטין?", Some(NO))],
                    },
                },
            ],
            members: vec![
                FamilyMember {
                    id: "david".into(),
                    display_name: "דוד".to_string(),
                    relation: "אב".to_string(),
                },
                FamilyMember {
                    id: "rivka".into(),
                    display_name: "רבקה".to_string(),
                    relation: "אם".to_string(),
                },
                FamilyMember {
                    id: "yosef".into(),
                    display_name: "יוסף".to_string(),
                    relation: "אח".to_string(),
                },
                FamilyMember {
                    id: "tamar".into(),
                    display_name: "תמר".to_string(),
                    relation: "אחות".to_string(),
                },
            ],
            disorders: vec![
                disorder("depression", "דיכאון"),
                disorder("anxiety", "חרדה"),
                disorder("ocd", "הפרעה טורדנית-כפייתית"),
                disorder("bipolar", "הפרעה דו-קוטבית"),
                disorder("schizophrenia", "סכיזופרניה"),
                disorder("eating-disorder", "הפרעת אכילה"),
                disorder("ptsd", "הפרעת דחק פוסט-טראומטית"),
            ],
            diseases: vec![
                disease("cystic-fibrosis", "סיסטיק פיברוזיס", true),
                disease("tay-sachs", "טיי-זקס", true),
                disease("gaucher", "גושה", true),
                disease("thalassemia", "תלסמיה", true),
                disease("familial-dysautonomia", "דיסאוטונומיה משפחתית", true),
                disease("fragile-x", "תסמונת X שביר", true),
                disease("sma", "ניוון שרירים שדרתי (SMA)", true),
                disease("canavan", "מחלת קנוון", true),
                disease("diabetes", "סוכרת", false),
                disease("heart-disease", "מחלות לב", false),
                disease("hypertension", "יתר לחץ דם", false),
            ],
            categories: vec![
                FamilyCategory {
                    id: "familial-polyposis".into(),
                    title: "פוליפוזיס משפחתית".to_string(),
                    gate: yes_no("polyposis", "האם אובחנה פוליפוזיס במשפחה?", Some(YES)),
                    sub_fields: vec![yes_no("colonoscopy", "האם בוצעה קולונוסקופיה?", Some(YES))],
                },
                FamilyCategory {
                    id: "polycystic-kidneys".into(),
                    title: "כליות פוליציסטיות".to_string(),
                    gate: yes_no("polycystic", "האם אובחנו כליות פוליציסטיות במשפחה?", Some(YES)),
                    sub_fields: vec![yes_no("dialysis", "האם נדרש טיפול בדיאליזה?", Some(YES))],
                },
            ],
            followup: FollowupSpec {
                fields: vec![
                    FollowupField {
                        key: "affected_count".into(),
                        title: "כמה בני משפחה חולים?".to_string(),
                    },
                    FollowupField {
                        key: "diagnosis_age".into(),
                        title: "באיזה גיל אובחנה המחלה?".to_string(),
                    },
                ],
            },
        }
    }
}
