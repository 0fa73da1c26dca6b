use crate::core::{AppError, AppState};
use crate::entities::Student;
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use jsonwebtoken::{DecodingKey, TokenData, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// struct che codifica il contenuto del token jwt emesso dal collaboratore
// di autenticazione esterno: identifica lo studente chiamante
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub enrollment_no: String,
    pub name: String,
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(
    jwt_token: &str,
    secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    debug!("Decoding JWT token");
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data: TokenData<Claims>| {
        info!(
            "JWT token decoded successfully for student: {}",
            data.claims.enrollment_no
        );
        data
    })
}

/// Middleware di autenticazione: verifica il bearer token e inserisce lo
/// Student corrispondente nelle Extension della richiesta
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden(
                "Please add the JWT token to the header",
            ));
        }
    };

    let mut header = auth_header.split_whitespace();
    let (_bearer, token) = (header.next(), header.next());
    let token = token.ok_or_else(|| {
        warn!("Malformed authorization header, expected 'Bearer <token>'");
        AppError::forbidden("Expected a bearer token")
    })?;

    let token_data = match decode_jwt(token, &state.jwt_secret) {
        Ok(data) => data,
        Err(_) => {
            warn!("Failed to decode JWT token");
            return Err(AppError::unauthorized("Unable to decode token"));
        }
    };

    // Fetch the student details from the database
    let current_student = match state.student.read(&token_data.claims.enrollment_no).await? {
        Some(student) => {
            info!("Student authenticated: {}", student.enrollment_no);
            student
        }
        None => {
            warn!(
                "Student not found in database: {}",
                token_data.claims.enrollment_no
            );
            return Err(AppError::unauthorized("You are not an authorized student"));
        }
    };
    req.extensions_mut().insert(current_student);
    // volendo si può recuperare lo studente da extension negli handler
    Ok(next.run(req).await)
}

/// Helper per gli endpoint "di proprietà": il chiamante deve coincidere
/// con lo studente indicato nel path
pub fn require_self(current: &Student, enrollment_no: &str) -> Result<(), AppError> {
    if current.enrollment_no != enrollment_no {
        warn!(
            "Student {} attempted to access data of {}",
            current.enrollment_no, enrollment_no
        );
        return Err(AppError::forbidden(
            "You can only access your own group data",
        ));
    }
    Ok(())
}
