// Typed view over the raw user record: only the fields the profile screen
// shows, all optional. Placeholders like "N/A" are filled in here, at the
// presentation boundary, never in the API client.

use crate::api::UserProfile;
use serde::Deserialize;

pub const MISSING: &str = "N/A";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ProfileView {
    pub login: Option<String>,
    pub email: Option<String>,
    pub displayname: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub wallet: Option<i64>,
    pub correction_point: Option<i64>,
    pub image: Option<Image>,
    #[serde(default)]
    pub campus: Vec<Campus>,
    #[serde(default)]
    pub cursus_users: Vec<CursusUser>,
    pub projects_users: Option<Vec<ProjectUser>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Image {
    pub link: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Campus {
    pub name: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CursusUser {
    pub cursus: Option<Cursus>,
    pub level: Option<f64>,
    pub grade: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Cursus {
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Skill {
    pub name: Option<String>,
    pub level: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ProjectUser {
    pub status: Option<String>,
    pub project: Option<Project>,
    pub final_mark: Option<i64>,
    #[serde(rename = "validated?")]
    pub validated: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Project {
    pub name: Option<String>,
}

/// One titled block of the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Field { label: String, value: String },
    Project { text: String, validated: bool },
    Note(String),
}

impl Row {
    fn field(label: &str, value: impl Into<String>) -> Self {
        Row::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

impl ProfileView {
    pub fn from_value(profile: &UserProfile) -> Result<Self, serde_json::Error> {
        ProfileView::deserialize(profile)
    }

    pub fn image_link(&self) -> Option<&str> {
        self.image.as_ref()?.link.as_deref().filter(|l| !l.is_empty())
    }

    /// Build the screen model, top to bottom.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = vec![Section {
            title: "Basic Information".into(),
            rows: vec![
                Row::field("Login", or_missing(&self.login)),
                Row::field("Email", or_missing(&self.email)),
                Row::field("Display Name", or_missing(&self.displayname)),
                Row::field("Phone", or_missing(&self.phone)),
                Row::field("Location", or_missing(&self.location)),
                Row::field("Wallet", number_or_missing(self.wallet)),
                Row::field("Correction Points", number_or_missing(self.correction_point)),
            ],
        }];

        if !self.campus.is_empty() {
            let rows = self
                .campus
                .iter()
                .flat_map(|c| {
                    [
                        Row::field("Name", or_missing(&c.name)),
                        Row::field("Time Zone", or_missing(&c.time_zone)),
                    ]
                })
                .collect();
            sections.push(Section {
                title: "Campus".into(),
                rows,
            });
        }

        if !self.cursus_users.is_empty() {
            let rows = self
                .cursus_users
                .iter()
                .flat_map(|cu| {
                    let name = cu.cursus.as_ref().and_then(|c| c.name.clone());
                    [
                        Row::field("Cursus", or_missing(&name)),
                        Row::field("Level", format!("{:.2}", cu.level.unwrap_or(0.0))),
                        Row::field("Grade", or_missing(&cu.grade)),
                    ]
                })
                .collect();
            sections.push(Section {
                title: "Cursus and Level".into(),
                rows,
            });

            for cu in self.cursus_users.iter().filter(|cu| !cu.skills.is_empty()) {
                let rows = cu
                    .skills
                    .iter()
                    .map(|s| {
                        let name = s.name.as_deref().unwrap_or("Unknown");
                        Row::field(name, skill_level(s.level.unwrap_or(0.0)))
                    })
                    .collect();
                sections.push(Section {
                    title: "Skills".into(),
                    rows,
                });
            }
        }

        sections.push(self.projects_section());
        sections
    }

    fn projects_section(&self) -> Section {
        let projects = self.projects_users.as_deref().unwrap_or_default();
        let rows: Vec<Row> = if projects.is_empty() {
            vec![Row::Note("No projects found".into())]
        } else {
            let finished: Vec<Row> = projects
                .iter()
                .filter(|p| {
                    p.status
                        .as_deref()
                        .is_some_and(|s| s.eq_ignore_ascii_case("finished"))
                })
                .map(|p| {
                    let name = p
                        .project
                        .as_ref()
                        .and_then(|pr| pr.name.as_deref())
                        .unwrap_or("Unknown");
                    let text = match p.final_mark {
                        Some(mark) => format!("{} - {}", name, mark),
                        None => name.to_string(),
                    };
                    Row::Project {
                        text,
                        validated: p.validated.unwrap_or(false),
                    }
                })
                .collect();
            if finished.is_empty() {
                vec![Row::Note("No finished projects".into())]
            } else {
                finished
            }
        };
        Section {
            title: "Projects".into(),
            rows,
        }
    }
}

fn or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}

fn number_or_missing(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// `8.42` -> `Level 8 (42%)`.
fn skill_level(level: f64) -> String {
    let whole = level.trunc();
    let percent = ((level - whole) * 100.0).trunc() as i64;
    format!("Level {} ({}%)", whole as i64, percent)
}
