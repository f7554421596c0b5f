use serde::Serialize;
use sqlx::FromRow;

/// A persisted candidate record. Serialized in camelCase to match the
/// `{ id, name, lastName, ..., cvPath }` shape the form expects.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub education: String,
    pub experience: String,
    /// Path of the stored CV, as written by the upload stage.
    pub cv_path: String,
}

/// Values for a new candidate row; the id is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCandidate {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub education: String,
    pub experience: String,
    pub cv_path: String,
}

#[cfg(test)]
impl NewCandidate {
    pub fn into_candidate(self, id: i32) -> Candidate {
        Candidate {
            id,
            name: self.name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            education: self.education,
            experience: self.experience,
            cv_path: self.cv_path,
        }
    }
}
