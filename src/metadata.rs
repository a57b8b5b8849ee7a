use indexmap::IndexMap;

use crate::validate;

#[derive(Debug, Clone)]
pub struct Metadata {
    pub project_name: String,
    pub slug: String,
    pub short_name: String,
    pub domain_name: String,
    pub title: String,
    pub description: String,
    pub email: String,
    pub phone: String,
}

impl Metadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_name: &str,
        short_name: &str,
        domain_name: &str,
        title: &str,
        description: &str,
        email: &str,
        phone: &str,
    ) -> Self {
        Self {
            project_name: project_name.trim().to_string(),
            slug: validate::slugify(project_name),
            short_name: short_name.trim().to_string(),
            domain_name: domain_name.trim().to_string(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }

    // Order matters: this is the canonical placeholder scheme consumed by
    // the substitution engine.
    pub fn replacements(&self) -> IndexMap<&'static str, &str> {
        IndexMap::from([
            ("{{PROJECT_NAME}}", self.project_name.as_str()),
            ("{{PROJECT_SLUG}}", self.slug.as_str()),
            ("{{SHORT_NAME}}", self.short_name.as_str()),
            ("{{DOMAIN_NAME}}", self.domain_name.as_str()),
            ("{{TITLE}}", self.title.as_str()),
            ("{{DESCRIPTION}}", self.description.as_str()),
            ("{{EMAIL}}", self.email.as_str()),
            ("{{PHONE}}", self.phone.as_str()),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct Template {
    pub key: &'static str,
    pub label: &'static str,
    pub url: Option<&'static str>,
}

impl Template {
    pub fn is_firebase(&self) -> bool {
        self.key.contains("-fb-")
    }
}

pub const TEMPLATES: [Template; 3] = [
    Template {
        key: "nuxt4-tw-template",
        label: "Nuxt Tailwind",
        url: Some("https://github.com/crunchwrap89/nuxt4-tw-template"),
    },
    Template {
        key: "nuxt4-tw-fb-template",
        label: "Nuxt Tailwind (Firebase)",
        url: Some("https://github.com/crunchwrap89/nuxt4-tw-fb-template"),
    },
    Template {
        key: "tbd-c",
        label: "TBD",
        url: None,
    },
];
