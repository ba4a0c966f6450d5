//! Back-office operation-log endpoints.

use crate::api::models::{Page, SysLog};
use crate::api::{fetch, DATA_ENVELOPE};
use crate::errors::ClientResult;
use crate::net::{RequestOptions, SessionClient, paths};

pub struct SysLogApi<'a> {
    client: &'a SessionClient,
}

impl<'a> SysLogApi<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        SysLogApi { client }
    }

    pub async fn list(&self, page_num: u32, page_size: u32) -> ClientResult<Option<Page<SysLog>>> {
        let path = format!(
            "{}?pageNum={}&pageSize={}",
            paths::SYSLOGS,
            page_num,
            page_size
        );
        fetch(self.client, &path, RequestOptions::get(), &DATA_ENVELOPE).await
    }
}
