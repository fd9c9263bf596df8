use crate::{
    api::{employee, export, form, records},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("non-zero period and burst");
        Governor::new(&cfg)
    }

    cfg.service(api_scope(&config.api_prefix).wrap(build_limiter(config.rate_api_per_min)));
}

pub fn api_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .service(web::resource("/employees").route(web::get().to(employee::list_employees)))
        .service(
            web::scope("/form")
                // /form
                .service(web::resource("").route(web::get().to(form::get_form)))
                .service(web::resource("/employee").route(web::put().to(form::select_employee)))
                .service(web::resource("/status").route(web::put().to(form::set_status)))
                // /form/entries
                .service(web::resource("/entries").route(web::post().to(form::add_time_entry)))
                // /form/entries/{row_id}
                .service(
                    web::resource("/entries/{row_id}")
                        .route(web::put().to(form::update_time_entry))
                        .route(web::delete().to(form::remove_time_entry)),
                )
                .service(web::resource("/submit").route(web::post().to(form::submit_form))),
        )
        .service(
            web::scope("/records")
                // /records
                .service(
                    web::resource("")
                        .route(web::get().to(records::list_records))
                        .route(web::delete().to(records::remove_records)),
                )
                .service(web::resource("/reset").route(web::post().to(records::reset_records)))
                // /records/rows/{row_id}
                .service(
                    web::resource("/rows/{row_id}").route(web::delete().to(records::remove_row)),
                ),
        )
        .service(
            web::resource("/export/{format}").route(web::get().to(export::export_table)),
        )
}
