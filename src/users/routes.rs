use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    auth::{self, token},
    config::config,
    ctx::BaseParams,
    db::{self, DB},
    errors::{Error, Result},
    extract::Json,
    state::AppState,
};

use super::{
    handlers::{self, CreateUserParameters},
    password, CreateAccount, GetUserResponse, Login, LoginResponse, RegisterResponse, UserProfile,
};

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/create-account", post(create_account))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/get-user", get(get_user))
        .layer(middleware::from_fn(auth::middleware::protected));

    public.merge(protected).with_state(state)
}

async fn create_account(
    Extension(db): Extension<DB>,
    Json(args): Json<CreateAccount>,
) -> Result<Json<RegisterResponse>> {
    let config = config();

    let full_name = args.full_name.filter(|v| !v.is_empty());
    let email = args.email.filter(|v| !v.is_empty());
    let password = args.password.filter(|v| !v.is_empty());

    let (Some(full_name), Some(email), Some(password)) = (full_name, email, password) else {
        return Err(Error::Validation("All fields required".into()));
    };

    match handlers::find_one_by_email(db.clone(), email.clone()).await {
        // duplicate registration is flagged in the body, not the status
        Ok(_) => {
            return Ok(Json(RegisterResponse {
                error: true,
                user: None,
                access_token: None,
                message: "User already exists".into(),
            }))
        }
        Err(db::Error::NotFound(_)) => {}
        Err(error) => return Err(error.into()),
    }

    let password = password::hash_password(&password)?;

    let user = handlers::create_user(
        db,
        CreateUserParameters {
            full_name,
            email,
            password,
        },
    )
    .await?;

    let access_token = token::issue(
        user.id,
        &user.email,
        &config.access_token_secret,
        config.access_token_ttl_minutes,
    )
    .map_err(|e| Error::Unexpected(e.to_string()))?;

    tracing::info!("{} registered", user.email);

    Ok(Json(RegisterResponse {
        error: false,
        user: Some(UserProfile::from(&user)),
        access_token: Some(access_token),
        message: "Registration successful".into(),
    }))
}

async fn login(Extension(db): Extension<DB>, Json(args): Json<Login>) -> Result<Json<LoginResponse>> {
    let config = config();

    let (Some(email), Some(password)) = (args.email, args.password) else {
        return Err(Error::InvalidCredentials);
    };

    let user = match handlers::find_one_by_email(db, email).await {
        Ok(user) => user,
        Err(db::Error::NotFound(_)) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error.into()),
    };

    if !password::verify_password(&password, &user.password) {
        return Err(Error::InvalidCredentials);
    }

    let access_token = token::issue(
        user.id,
        &user.email,
        &config.access_token_secret,
        config.access_token_ttl_minutes,
    )
    .map_err(|e| Error::Unexpected(e.to_string()))?;

    tracing::info!("{} logged in", user.email);

    Ok(Json(LoginResponse {
        error: false,
        message: "Login Successful".into(),
        email: user.email,
        access_token,
    }))
}

async fn get_user(BaseParams { db, ctx }: BaseParams) -> Result<Json<GetUserResponse>> {
    let user_id = ctx.require_user_id()?;

    // the token may outlive the record it was issued for
    let user = match handlers::find_one_by_id(db, user_id).await {
        Ok(user) => user,
        Err(db::Error::NotFound(_)) => return Err(Error::Unauthorized),
        Err(error) => return Err(error.into()),
    };

    Ok(Json(GetUserResponse {
        user: UserProfile::from(&user),
        message: "".into(),
    }))
}
