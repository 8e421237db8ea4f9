pub mod token;

pub mod middleware {
    use axum::{extract::Request, middleware::Next, response::Response};

    use crate::{ctx::Ctx, errors::Error, Result};

    /// Rejects with 401 before the handler runs when no valid bearer identity is
    /// attached. A present-but-invalid token is already rejected with 403 by the
    /// `Ctx` extractor.
    pub async fn protected(ctx: Ctx, request: Request, next: Next) -> Result<Response> {
        ctx.user.as_ref().ok_or(Error::Unauthorized)?;
        Ok(next.run(request).await)
    }
}
