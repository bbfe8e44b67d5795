use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use facade_service::Service;
use pingora::http::ResponseHeader;
use pingora::proxy::{ProxyHttp, Session};
use pingora::upstreams::peer::HttpPeer;
use pingora::{Error, ErrorType, Result};

use crate::request_adapter::adapt;

/// The mock server's only pingora service: it never proxies to an
/// upstream. `request_filter` always shapes and writes the final response
/// itself, short-circuiting the rest of the proxy pipeline.
pub struct MockProxy {
    service: Arc<Service>,
}

impl MockProxy {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }

    async fn read_full_body(session: &mut Session) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        while let Some(chunk) = session.read_request_body().await? {
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

pub struct MockCtx;

#[async_trait]
impl ProxyHttp for MockProxy {
    type CTX = MockCtx;

    fn new_ctx(&self) -> Self::CTX {
        MockCtx
    }

    async fn request_filter(&self, session: &mut Session, _ctx: &mut Self::CTX) -> Result<bool> {
        let body = Self::read_full_body(session).await?;
        let request = adapt(session.req_header(), body);

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            "matching request"
        );

        let result = self.service.match_request(request).await;

        let mut response_header = ResponseHeader::build(result.status_code, Some(result.headers.len() + 1))?;
        for (name, value) in &result.headers {
            response_header.insert_header(name.clone(), value.clone())?;
        }
        response_header.insert_header("Content-Length", result.body.len().to_string())?;

        session.write_response_header(Box::new(response_header), false).await?;
        session.write_response_body(Some(Bytes::from(result.body)), true).await?;

        Ok(true)
    }

    async fn upstream_peer(&self, _session: &mut Session, _ctx: &mut Self::CTX) -> Result<Box<HttpPeer>> {
        Err(Error::explain(
            ErrorType::HTTPStatus(500),
            "mock proxy never proxies upstream; request_filter always responds",
        ))
    }
}
