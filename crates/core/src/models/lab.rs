use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Lab {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabImage {
    pub id: i64,
    pub lab_id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLab {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabImageInput {
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabInput {
    pub name: String,
    pub description: String,
    pub lab_image: Option<Vec<LabImageInput>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabImageResponse {
    pub lab_id: i64,
    pub image_url: String,
}

impl From<LabImage> for LabImageResponse {
    fn from(image: LabImage) -> Self {
        Self {
            lab_id: image.lab_id,
            image_url: image.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResponse {
    pub lab_id: i64,
    pub name: String,
    pub description: String,
    pub lab_image: Vec<LabImageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LabResponse {
    pub fn new(lab: Lab, images: Vec<LabImage>) -> Self {
        Self {
            lab_id: lab.id,
            name: lab.name,
            description: lab.description,
            lab_image: images.into_iter().map(LabImageResponse::from).collect(),
            created_at: lab.created_at,
            updated_at: lab.updated_at,
        }
    }
}

/// Lab block embedded in booking responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabSummary {
    pub lab_id: i64,
    pub name: String,
    pub description: String,
}

impl From<&Lab> for LabSummary {
    fn from(lab: &Lab) -> Self {
        Self {
            lab_id: lab.id,
            name: lab.name.clone(),
            description: lab.description.clone(),
        }
    }
}
