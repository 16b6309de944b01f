use actix_web::web;

use crate::database::RosterStore;

pub mod artists;
pub mod directory;
pub mod my_page;
pub mod shared;
pub mod teams;

/// Mounts the `/api/v1` routes for a given store.
pub fn configure<S: RosterStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/directory", web::get().to(directory::get_directory::<S>))
            .service(
                web::scope("/artists")
                    .route("", web::get().to(artists::list_artists::<S>))
                    .route("/featured", web::get().to(artists::featured_artists::<S>))
                    .route("/{slug}", web::get().to(artists::get_artist::<S>)),
            )
            .service(
                web::scope("/teams")
                    .route("", web::get().to(teams::list_teams::<S>))
                    .route("/{slug}", web::get().to(teams::get_team::<S>)),
            )
            .service(
                web::scope("/me")
                    .route("", web::get().to(my_page::get_my_page::<S>))
                    .route("/careers", web::post().to(my_page::create_career::<S>))
                    .route("/careers/{id}", web::delete().to(my_page::delete_career::<S>))
                    .route("/sign-out", web::post().to(my_page::sign_out)),
            ),
    );
}
