use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::env;

use actix_web::web;

use storefront::api::web::AppRouteTable;
use storefront::confidentiality;
use storefront::constant::env_vars::EXPECTED_LABELS;
use storefront::logging::{app_log_event, AppLogContext, AppLogLevel};
use storefront::network::{app_web_service, middleware, net_server_listener};
use storefront::{AppConfig, AppSharedState};

async fn start_server(shr_state: AppSharedState) {
    let log_ctx_p = shr_state.log_context().clone();
    let cfg = shr_state.config().clone();
    let listener = &cfg.api_server.listen;
    let routes_cfg = listener
        .routes
        .iter()
        .map(|r| (r.path.clone(), r.handler.clone()))
        .collect::<Vec<(String, String)>>();
    let api_ver = listener.api_version.clone();
    let cors_cfg_path = cfg.basepath.system.clone() + listener.cors.as_str();
    let cors_cfg = match middleware::load_cors_cfg(cors_cfg_path) {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "cors config load error, detail: {:?}",
                e
            );
            return;
        }
    };
    {
        // dry assembly, refuse to start with a route table that maps nothing
        let rtable = AppRouteTable::get(api_ver.as_str());
        let (_app, num_applied) =
            app_web_service(rtable, routes_cfg.clone(), shr_state.clone());
        if num_applied == 0 {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "no route created, web API server failed to start"
            );
            return;
        }
    }
    let shr_state_cpy = shr_state.clone();
    let limit_req_body = cfg.api_server.limit_req_body_in_bytes;
    let cors_cfg_cpy = cors_cfg.clone();
    let app_init_cb = move || {
        let rtable = AppRouteTable::get(api_ver.as_str());
        let (app, _num_applied) =
            app_web_service(rtable, routes_cfg.clone(), shr_state_cpy.clone());
        app.app_data(web::JsonConfig::default().limit(limit_req_body))
            .wrap(middleware::cors(&cors_cfg_cpy))
    };
    let result = net_server_listener(app_init_cb, listener.host.as_str(), listener.port);
    match result {
        Ok(server) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::INFO,
                "API server starts listening, {}:{}",
                listener.host.as_str(),
                listener.port
            );
            let srv = server
                .workers(cfg.api_server.num_workers as usize)
                .max_connections(listener.max_connections as usize)
                .run();
            let _ = srv.await;
            app_log_event!(log_ctx_p, AppLogLevel::WARNING, "API server terminating ");
        }
        Err(e) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "API server failed to start, {} ",
                e
            );
        }
    }
} // end of fn start_server

fn main() {
    let iter = env::vars().filter(|(k, _v)| EXPECTED_LABELS.contains(&k.as_str()));
    let arg_map: HashMap<String, String, RandomState> = HashMap::from_iter(iter);
    match AppConfig::new(arg_map) {
        Ok(cfg) => {
            let log_ctx = AppLogContext::new(&cfg.basepath, &cfg.api_server.logging);
            let confidential = confidentiality::build_context();
            match AppSharedState::new(cfg, log_ctx, confidential) {
                Ok(shr_state) => {
                    actix_web::rt::System::new().block_on(start_server(shr_state));
                }
                Err(e) => {
                    println!("app failed to init shared state, progress: {:?} ", e);
                }
            }
        }
        Err(e) => {
            println!("app failed to configure, error code: {} ", e);
        }
    };
} // end of main
