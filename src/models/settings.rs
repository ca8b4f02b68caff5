use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// When a provider can take on new work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Limited,
    Unavailable,
    Future,
}

/// Who may see a profile in search results and directory listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Public,
    /// Registered users only
    Members,
    /// Only shown when applying to jobs
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// Editable settings of the signed-in member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Professional headline, e.g. "Full Stack Developer"
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Ids from [`skill_options`]
    #[serde(default)]
    pub skills: Vec<String>,
    /// USD per hour
    #[serde(default, alias = "hourlyRate")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub location: String,
    /// Miles
    #[serde(default, alias = "travelDistance")]
    pub travel_distance: Option<u32>,
    #[serde(default, alias = "profileVisibility")]
    pub profile_visibility: ProfileVisibility,
}

/// The settings form: current values plus the skills one can pick from
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSettingsPage {
    pub settings: ProfileSettings,
    pub skill_options: &'static [SkillOption],
}

impl ProfileSettings {
    /// Copy with surrounding whitespace removed from the free-text fields
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.email,
            &mut self.phone,
            &mut self.title,
            &mut self.description,
            &mut self.location,
        ] {
            *field = field.trim().to_string();
        }
        self
    }
}

static SKILL_OPTIONS: &[SkillOption] = &[
    SkillOption { id: "javascript", name: "JavaScript" },
    SkillOption { id: "react", name: "React" },
    SkillOption { id: "nodejs", name: "Node.js" },
    SkillOption { id: "typescript", name: "TypeScript" },
    SkillOption { id: "python", name: "Python" },
    SkillOption { id: "java", name: "Java" },
    SkillOption { id: "csharp", name: "C#" },
    SkillOption { id: "php", name: "PHP" },
    SkillOption { id: "ruby", name: "Ruby" },
    SkillOption { id: "aws", name: "AWS" },
    SkillOption { id: "docker", name: "Docker" },
    SkillOption { id: "kubernetes", name: "Kubernetes" },
    SkillOption { id: "mongodb", name: "MongoDB" },
    SkillOption { id: "sql", name: "SQL" },
    SkillOption { id: "figma", name: "Figma" },
    SkillOption { id: "sketch", name: "Sketch" },
    SkillOption { id: "photoshop", name: "Photoshop" },
    SkillOption { id: "illustrator", name: "Illustrator" },
    SkillOption { id: "seo", name: "SEO" },
    SkillOption { id: "marketing", name: "Digital Marketing" },
];

pub fn skill_options() -> &'static [SkillOption] {
    SKILL_OPTIONS
}

pub fn is_known_skill(id: &str) -> bool {
    SKILL_OPTIONS.iter().any(|skill| skill.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_form() {
        let settings: ProfileSettings = serde_json::from_str(
            r#"{
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "skills": ["react"],
                "hourlyRate": 45,
                "availability": "future",
                "travelDistance": 25,
                "profileVisibility": "members"
            }"#,
        )
        .unwrap();

        assert_eq!(settings.first_name, "John");
        assert_eq!(settings.hourly_rate, Some(Decimal::from(45)));
        assert_eq!(settings.availability, Availability::Future);
        assert_eq!(settings.travel_distance, Some(25));
        assert_eq!(settings.profile_visibility, ProfileVisibility::Members);
        assert!(settings.phone.is_empty());
    }

    #[test]
    fn test_unknown_availability_rejected() {
        let result: Result<ProfileSettings, _> =
            serde_json::from_str(r#"{"availability": "sometimes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_trimmed() {
        let settings = ProfileSettings {
            first_name: "  John ".to_string(),
            location: " New York, USA ".to_string(),
            ..Default::default()
        }
        .trimmed();

        assert_eq!(settings.first_name, "John");
        assert_eq!(settings.location, "New York, USA");
    }

    #[test]
    fn test_skill_catalogue() {
        assert_eq!(skill_options().len(), 20);
        assert!(is_known_skill("kubernetes"));
        assert!(!is_known_skill("cobol"));
    }
}
