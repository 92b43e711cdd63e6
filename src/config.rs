use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;

use serde::de::Error as DeserializeError;
use serde::{Deserialize, Deserializer};

use crate::constant::{env_vars, hard_limit, logging as const_log};
use crate::error::{AppError, AppErrorCode};
use crate::{AppLogAlias, WebApiPath};

fn jsn_deny_empty_string<'de, D>(raw: D) -> DefaultResult<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(raw)?;
    if s.is_empty() {
        let unexp = serde::de::Unexpected::Str(s.as_str());
        Err(DeserializeError::invalid_value(unexp, &"non-empty-string"))
    } else {
        Ok(s)
    }
}

#[derive(Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: const_log::Level,
    pub destination: const_log::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<String>,
    pub level: Option<const_log::Level>,
}

#[derive(Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

#[derive(Deserialize)]
pub struct WebApiRouteCfg {
    pub path: WebApiPath,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub handler: String,
}

#[derive(Deserialize)]
pub struct WebApiListenCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub api_version: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub cors: String,
    pub routes: Vec<WebApiRouteCfg>,
}

#[derive(Deserialize, Debug)]
pub struct AppInMemoryDbCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub alias: String,
    pub max_items: u32,
}

#[allow(non_camel_case_types)]
#[derive(Deserialize)]
#[serde(tag = "_type")]
pub enum AppDataStoreCfg {
    InMemory(AppInMemoryDbCfg),
} // the relational store behind the deployed site is maintained by a
  // separate team, this service only sees simple create / read / update
  // calls, TODO support for other store types

#[allow(non_camel_case_types)]
#[derive(Deserialize)]
#[serde(tag = "mode")]
pub enum AppGatewayCfg {
    dev {
        #[serde(deserialize_with = "jsn_deny_empty_string")]
        name: String,
        #[serde(deserialize_with = "jsn_deny_empty_string")]
        host: String,
        port: u16,
        confidential_key_id: String,
        confidential_key_secret: String,
    },
    test {
        #[serde(deserialize_with = "jsn_deny_empty_string")]
        name: String,
        confidential_key_id: String,
        confidential_key_secret: String,
    },
}

#[derive(Deserialize)]
pub struct ApiServerCfg {
    pub logging: AppLoggingCfg,
    pub listen: WebApiListenCfg,
    pub limit_req_body_in_bytes: usize,
    pub num_workers: u8,
    pub data_store: Vec<AppDataStoreCfg>,
    pub gateway: AppGatewayCfg,
}

pub struct AppBasepathCfg {
    pub system: String,
    pub service: String,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub api_server: ApiServerCfg,
    pub order_timing_enforced: bool,
}

impl AppConfig {
    pub fn new(
        mut env_var_map: HashMap<String, String, RandomState>,
    ) -> DefaultResult<Self, AppError> {
        let sys_basepath = if let Some(s) = env_var_map.remove(env_vars::SYS_BASEPATH) {
            s + "/"
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingSysBasePath,
            });
        };
        let app_basepath = if let Some(a) = env_var_map.remove(env_vars::SERVICE_BASEPATH) {
            a + "/"
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAppBasePath,
            });
        };
        let api_srv_cfg = if let Some(cfg_path) = env_var_map.remove(env_vars::CFG_FILEPATH) {
            let fullpath = app_basepath.clone() + &cfg_path;
            Self::parse_from_file(fullpath)?
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingConfigPath,
            });
        };
        // the timing gate is enforced unless operators explicitly turn it
        // off, e.g. in end-to-end test environments
        let timing_enforced = env_var_map
            .remove(env_vars::ENFORCE_ORDER_TIMING)
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        Ok(Self {
            api_server: api_srv_cfg,
            basepath: AppBasepathCfg {
                system: sys_basepath,
                service: app_basepath,
            },
            order_timing_enforced: timing_enforced,
        })
    } // end of fn new

    pub fn parse_from_file(filepath: String) -> DefaultResult<ApiServerCfg, AppError> {
        // load and parse a config file with given path
        match File::open(filepath) {
            Ok(fileobj) => {
                let reader = BufReader::new(fileobj);
                match serde_json::from_reader::<BufReader<File>, ApiServerCfg>(reader) {
                    Ok(jsnobj) => {
                        Self::_check_web_listener(&jsnobj.listen)?;
                        Self::_check_logging(&jsnobj.logging)?;
                        Self::_check_datastore(&jsnobj.data_store)?;
                        Ok(jsnobj)
                    }
                    Err(e) => Err(AppError {
                        detail: Some(e.to_string()),
                        code: AppErrorCode::InvalidJsonFormat,
                    }),
                }
            }
            Err(e) => Err(AppError {
                detail: Some(e.to_string()),
                code: AppErrorCode::IOerror(e.kind()),
            }),
        }
    } // end of fn parse_from_file

    fn _check_web_listener(obj: &WebApiListenCfg) -> DefaultResult<(), AppError> {
        let mut iter = obj
            .api_version
            .split('.')
            .filter(|i| i.parse::<u16>().is_err());
        if iter.next().is_some() {
            return Err(AppError {
                detail: Some(obj.api_version.clone()),
                code: AppErrorCode::InvalidRouteConfig,
            });
        }
        if obj.routes.is_empty() {
            Err(AppError {
                detail: None,
                code: AppErrorCode::NoRouteApiServerCfg,
            })
        } else {
            Ok(())
        }
    }

    fn _check_logging(obj: &AppLoggingCfg) -> DefaultResult<(), AppError> {
        if obj.handlers.is_empty() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::NoLogHandlerCfg,
            });
        }
        if obj.loggers.is_empty() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::NoLoggerCfg,
            });
        }
        let mut iter = obj.handlers.iter().filter(|h| {
            matches!(h.destination, const_log::Destination::LOCALFS) && h.path.is_none()
        });
        if let Some(bad) = iter.next() {
            return Err(AppError {
                detail: Some(bad.alias.clone()),
                code: AppErrorCode::MissingAliasLogHdlerCfg,
            });
        }
        let hdlr_aliases = obj
            .handlers
            .iter()
            .map(|h| h.alias.as_str())
            .collect::<Vec<_>>();
        for logger in obj.loggers.iter() {
            if logger.handlers.is_empty() {
                return Err(AppError {
                    detail: Some(logger.alias.clone()),
                    code: AppErrorCode::NoHandlerInLoggerCfg,
                });
            }
            let mut iter = logger
                .handlers
                .iter()
                .filter(|a| !hdlr_aliases.contains(&a.as_str()));
            if let Some(bad) = iter.next() {
                return Err(AppError {
                    detail: Some(format!("{}, {}", logger.alias, bad)),
                    code: AppErrorCode::MissingAliasLoggerCfg,
                });
            }
        }
        Ok(())
    } // end of fn _check_logging

    fn _check_datastore(obj: &Vec<AppDataStoreCfg>) -> DefaultResult<(), AppError> {
        if obj.is_empty() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingDataStore,
            });
        }
        let mut iter = obj.iter().filter(|c| match c {
            AppDataStoreCfg::InMemory(d) => {
                d.max_items == 0 || d.max_items > hard_limit::MAX_ITEMS_PER_INMEM_TABLE
            }
        });
        if let Some(AppDataStoreCfg::InMemory(bad)) = iter.next() {
            Err(AppError {
                detail: Some(format!("{}, max-items: {}", bad.alias, bad.max_items)),
                code: AppErrorCode::ExceedingMaxLimit,
            })
        } else {
            Ok(())
        }
    }
} // end of impl AppConfig
