use std::sync::Arc;

use serde::Serialize;

use super::helpers::{extract_token_from_header, validate_token};
use crate::reports::Viewer;
use crate::server::AppState;
use crate::types::{Profile, Role, Token};

/// Where a caller stands before any report data is shown.
///
/// Every screen that reads reports resolves one of these first and shows
/// nothing unless it is `Ready`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    Unauthenticated,
    ProfileMissing { user_id: String },
    RoleUnassigned { profile: Profile },
    Ready { profile: Profile, role: Role },
}

impl Session {
    /// Builds the session for a validated token. Admin tokens carry no
    /// portal identity.
    pub fn from_token(token: &Token, profile: Option<Profile>) -> Session {
        let Some(user_id) = token.profile_id.clone() else {
            return Session::Unauthenticated;
        };
        match profile {
            None => Session::ProfileMissing { user_id },
            Some(profile) => match profile.role {
                Some(role) => Session::Ready { profile, role },
                None => Session::RoleUnassigned { profile },
            },
        }
    }

    /// Resolves a session from a raw Authorization header. Any credential
    /// problem resolves to `Unauthenticated`.
    pub fn resolve(state: &Arc<AppState>, auth_header: Option<&str>) -> Session {
        let raw = match extract_token_from_header(auth_header) {
            Ok(Some(raw)) => raw,
            Ok(None) | Err(_) => return Session::Unauthenticated,
        };
        match validate_token(state, &raw) {
            Ok(validated) => Session::from_token(&validated.token, validated.profile),
            Err(e) => {
                tracing::debug!("Session resolved as unauthenticated: {e:?}");
                Session::Unauthenticated
            }
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Session::RoleUnassigned { profile } | Session::Ready { profile, .. } => Some(profile),
            Session::Unauthenticated | Session::ProfileMissing { .. } => None,
        }
    }

    /// The viewer reports are resolved for. Only a ready session has one.
    pub fn viewer(&self) -> Option<Viewer> {
        match self {
            Session::Ready { profile, role } => Some(Viewer::new(profile.id.clone(), Some(*role))),
            _ => None,
        }
    }
}
