use std::net::IpAddr;

use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::http_client::HttpParams;
use crate::types::StatusResult;

const LOGIN_URL: &str = "/dns/login.json";
const CURRENT_IP_URL: &str = "/ip/get-my-ip.json";
const BALANCE_URL: &str = "/account/get-balance.json";

/// Account level operations.
#[derive(Debug, Clone, Copy)]
pub struct AccountService<'a> {
    client: &'a Client,
}

impl<'a> AccountService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Checks the configured credentials.
    pub async fn login(&self) -> Result<StatusResult> {
        self.client.post(LOGIN_URL, HttpParams::new()).await
    }

    /// The address the API sees the client connecting from.
    pub async fn current_ip(&self) -> Result<IpAddr> {
        #[derive(Deserialize)]
        struct CurrentIp {
            ip: IpAddr,
        }

        let response: CurrentIp = self.client.post(CURRENT_IP_URL, HttpParams::new()).await?;
        Ok(response.ip)
    }

    /// Prepaid funds of the account.
    pub async fn balance(&self) -> Result<f64> {
        #[derive(Deserialize)]
        struct Balance {
            #[serde(default, deserialize_with = "crate::utils::lenient::number")]
            funds: f64,
        }

        let response: Balance = self.client.post(BALANCE_URL, HttpParams::new()).await?;
        Ok(response.funds)
    }
}
