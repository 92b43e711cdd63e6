use actix_http::Request;
use actix_service::IntoServiceFactory;
use actix_web::body::MessageBody;
use actix_web::dev::{AppConfig, Response, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;
use actix_web::{App, HttpServer};

use crate::api::web::AppRouteTable;
use crate::AppSharedState;

/*
 * the framework does not intend to let users transfer `App` object
 * around code functions, it is tricky to do so.
 *
 * The test example in the following FAQ demonstrates how to do this :
 * https://github.com/actix/actix-web/wiki/FAQ#how-can-i-return-app-from-a-function--why-is-appentry-private
 * */
pub fn app_web_service(
    mut route_table: AppRouteTable,
    cfg: Vec<(String, String)>,
    shr_state: AppSharedState,
) -> (
    App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::error::Error,
            Config = (),
            InitError = (),
        >,
    >,
    usize,
) {
    let mut num_applied = 0usize;
    let num_applied_p = &mut num_applied;
    let cfg_fn = move |c: &mut web::ServiceConfig| {
        // routes sharing one path (e.g. GET and PUT of a config endpoint)
        // must land in the same resource, otherwise the first path match
        // would shadow the other method
        let mut grouped: Vec<(String, Vec<actix_web::Route>)> = Vec::new();
        for (path, inner_label) in cfg.into_iter() {
            if let Some(found) = route_table.entries.remove(inner_label.as_str()) {
                *num_applied_p += 1;
                if let Some(entry) = grouped.iter_mut().find(|(p, _)| p == &path) {
                    entry.1.push(found);
                } else {
                    grouped.push((path, vec![found]));
                }
            }
        }
        for (path, routes) in grouped {
            let mut rsc = web::resource(path.as_str());
            for r in routes {
                rsc = rsc.route(r);
            }
            c.service(rsc);
        }
    };
    let path_prefix = format!("/{}", route_table.version.as_str());
    let v_scope = web::scope(path_prefix.as_str()).configure(cfg_fn);
    let app = App::new()
        .app_data(web::Data::new(shr_state))
        .service(v_scope);
    (app, num_applied)
} // end of fn app_web_service

pub mod middleware {
    use std::fs::File;
    use std::io::BufReader;
    use std::result::Result as DefaultResult;

    use actix_cors::Cors;
    use serde::Deserialize;

    use crate::error::{AppError, AppErrorCode};

    #[derive(Deserialize, Clone)]
    struct CorsAllowedOrigin {
        storefront: String,
    }

    #[allow(non_snake_case)]
    #[derive(Deserialize, Clone)]
    pub struct CorsConfig {
        ALLOWED_ORIGIN: CorsAllowedOrigin,
        ALLOWED_METHODS: Vec<String>,
        ALLOWED_HEADERS: Vec<String>,
        ALLOW_CREDENTIALS: bool,
        PREFLIGHT_MAX_AGE: usize,
    }

    pub fn load_cors_cfg(cfg_path: String) -> DefaultResult<CorsConfig, AppError> {
        let f = File::open(cfg_path).map_err(|e| AppError {
            detail: Some(e.to_string()),
            code: AppErrorCode::IOerror(e.kind()),
        })?;
        let reader = BufReader::new(f);
        serde_json::from_reader::<BufReader<File>, CorsConfig>(reader).map_err(|e| AppError {
            detail: Some(e.to_string()),
            code: AppErrorCode::InvalidJsonFormat,
        })
    }

    pub fn cors(cfg: &CorsConfig) -> Cors {
        let mut out = Cors::default()
            .allowed_origin(cfg.ALLOWED_ORIGIN.storefront.as_str())
            .allowed_methods(cfg.ALLOWED_METHODS.iter().map(|m| m.as_str()))
            .allowed_headers(cfg.ALLOWED_HEADERS.iter().map(|h| h.as_str()))
            .max_age(cfg.PREFLIGHT_MAX_AGE);
        if cfg.ALLOW_CREDENTIALS {
            out = out.supports_credentials();
        }
        out
    }
} // end of inner-module middleware

pub fn net_server_listener<F, I, S, B>(
    app_init_cb: F,
    domain_host: &str,
    port: u16,
) -> std::io::Result<HttpServer<F, I, S, B>>
where
    F: Fn() -> I + Clone + Send + 'static,
    I: IntoServiceFactory<S, Request>,
    S: ServiceFactory<Request, Config = AppConfig> + 'static,
    S::Error: Into<actix_web::error::Error>,
    S::InitError: std::fmt::Debug,
    S::Response: Into<Response<B>>,
    B: MessageBody + 'static,
{
    let domain = format!("{domain_host}:{port}");
    HttpServer::new(app_init_cb).bind(domain)
}
