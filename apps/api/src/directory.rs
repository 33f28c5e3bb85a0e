//! Peer skill directory: who to contact for a given skill.

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::AppState;
use crate::store::models::WellKnownSkill;

#[derive(Deserialize)]
pub struct SkillForm {
    pub skill: String,
}

#[derive(Debug, Serialize)]
pub struct ContactLink {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct ShowNamesResponse {
    pub skill: String,
    pub contacts: Vec<ContactLink>,
}

/// POST /show_names
pub async fn handle_show_names(
    State(state): State<AppState>,
    Form(form): Form<SkillForm>,
) -> Json<ShowNamesResponse> {
    let contacts: Vec<ContactLink> = state
        .store
        .contacts_with_skill(&form.skill)
        .into_iter()
        .map(|c| ContactLink {
            name: c.name.clone(),
            link: c.link.clone(),
        })
        .collect();
    debug!("{} contact(s) for skill '{}'", contacts.len(), form.skill);

    Json(ShowNamesResponse {
        skill: form.skill,
        contacts,
    })
}

/// GET /skills
pub async fn handle_skills(State(state): State<AppState>) -> Json<Vec<WellKnownSkill>> {
    Json(state.store.well_known().to_vec())
}
