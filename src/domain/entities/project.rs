use serde::{Deserialize, Serialize};
use validator::Validate;

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 200;
const MAX_CATEGORY_LENGTH: u64 = 100;
const MAX_DESCRIPTION_LENGTH: u64 = 5000;
const MAX_URL_LENGTH: u64 = 2048;
const MAX_TAGS: u64 = 30;

// ───── Stored Model ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub github: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewProjectRequest {
    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    pub category: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub image: String,

    #[validate(length(max = MAX_TAGS))]
    pub tags: Vec<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub link: String,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub github: String,
}

impl NewProjectRequest {
    pub fn into_project(self, id: u64) -> Project {
        Project {
            id,
            title: self.title,
            category: self.category.trim().to_string(),
            description: self.description,
            image: self.image,
            tags: normalize_tags(self.tags),
            link: self.link,
            github: self.github,
        }
    }
}

/// Partial update: absent fields keep their stored value. `id` is not accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    pub category: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub image: Option<String>,

    #[validate(length(max = MAX_TAGS))]
    pub tags: Option<Vec<String>>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub link: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub github: Option<String>,
}

impl UpdateProjectRequest {
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(category) = &self.category {
            project.category = category.trim().to_string();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(image) = &self.image {
            project.image = image.clone();
        }
        if let Some(tags) = &self.tags {
            project.tags = normalize_tags(tags.clone());
        }
        if let Some(link) = &self.link {
            project.link = link.clone();
        }
        if let Some(github) = &self.github {
            project.github = github.clone();
        }
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_only_touches_provided_fields() {
        let mut project = NewProjectRequest {
            title: "Rebrand".into(),
            category: "branding".into(),
            tags: vec!["logo".into()],
            ..Default::default()
        }
        .into_project(3);

        let patch = UpdateProjectRequest {
            title: Some("Rebrand 2.0".into()),
            tags: Some(vec![" print ".into(), "".into()]),
            ..Default::default()
        };
        patch.apply_to(&mut project);

        assert_eq!(project.id, 3);
        assert_eq!(project.title, "Rebrand 2.0");
        assert_eq!(project.category, "branding");
        assert_eq!(project.tags, vec!["print".to_string()]);
    }

    #[test]
    fn stored_projects_tolerate_missing_fields() {
        let project: Project = serde_json::from_str(r#"{"id": 4, "title": "Launch"}"#).unwrap();
        assert_eq!(project.title, "Launch");
        assert!(project.tags.is_empty());
    }
}
