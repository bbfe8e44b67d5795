use async_trait::async_trait;
use bytes::Bytes;
use pingora::http::ResponseHeader;
use pingora::proxy::{ProxyHttp, Session};
use pingora::upstreams::peer::HttpPeer;
use pingora::{Error, ErrorType, Result};

const HEALTH_BODY: &str = r#"{"status":"ok"}"#;

/// Serves the liveness endpoint on its own port. Every request gets the
/// same response; there is nothing to route.
pub struct HealthProxy;

pub struct HealthCtx;

#[async_trait]
impl ProxyHttp for HealthProxy {
    type CTX = HealthCtx;

    fn new_ctx(&self) -> Self::CTX {
        HealthCtx
    }

    async fn request_filter(&self, session: &mut Session, _ctx: &mut Self::CTX) -> Result<bool> {
        let mut response_header = ResponseHeader::build(200, Some(2))?;
        response_header.insert_header("Content-Type", "application/json")?;
        response_header.insert_header("Content-Length", HEALTH_BODY.len().to_string())?;

        session.write_response_header(Box::new(response_header), false).await?;
        session
            .write_response_body(Some(Bytes::from_static(HEALTH_BODY.as_bytes())), true)
            .await?;

        Ok(true)
    }

    async fn upstream_peer(&self, _session: &mut Session, _ctx: &mut Self::CTX) -> Result<Box<HttpPeer>> {
        Err(Error::explain(
            ErrorType::HTTPStatus(500),
            "health proxy never proxies upstream; request_filter always responds",
        ))
    }
}
