//! OpenAPI documents, one per service, served by Swagger UI at `/docs`.
//!
//! The schema structs below mirror the wire shapes of the domain types so the
//! domain crates stay free of documentation derives.

use utoipa::OpenApi;
use utoipa::ToSchema;

use configs::ServiceKind;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub service: String }

#[derive(ToSchema)]
pub struct DetailDoc { pub detail: String }

#[derive(ToSchema)]
pub struct NewBookDoc { pub id: Option<i32>, pub title: String, pub author: String, pub year: i32 }

#[derive(ToSchema)]
pub struct BookDoc { pub id: i32, pub title: String, pub author: String, pub year: i32 }

#[derive(ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct ProfileDoc { pub interests: Option<String>, pub about: Option<String>, pub address: Option<String> }

#[derive(ToSchema)]
pub struct AccountResponse { pub id: i32, pub email: String, pub name: String, pub profile: Option<ProfileDoc> }

#[derive(ToSchema)]
pub struct NewUserDoc { pub email: String, pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct UserPatchDoc { pub email: Option<String>, pub username: Option<String>, pub password: Option<String> }

#[derive(ToSchema)]
pub struct DetailsDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
}

#[derive(ToSchema)]
pub struct UserDetailsDoc {
    pub id: i32,
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct DirectoryUserDoc {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
    pub details: Option<UserDetailsDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::health, crate::routes::library::create_book, crate::routes::library::list_books, crate::routes::library::get_book),
    components(schemas(HealthResponse, NewBookDoc, BookDoc)),
    tags((name = "health"), (name = "books"))
)]
pub struct LibraryDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::profiles::register,
        crate::routes::profiles::login,
        crate::routes::profiles::get_user,
        crate::routes::profiles::update_profile,
    ),
    components(schemas(HealthResponse, RegisterRequest, LoginRequest, ProfileDoc, AccountResponse)),
    tags((name = "health"), (name = "accounts"))
)]
pub struct ProfilesDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::directory::create_user,
        crate::routes::directory::list_users,
        crate::routes::directory::get_user,
        crate::routes::directory::update_user,
        crate::routes::directory::delete_user,
        crate::routes::directory::create_details,
        crate::routes::directory::get_details,
        crate::routes::directory::update_details,
        crate::routes::directory::delete_details,
    ),
    components(schemas(HealthResponse, DetailDoc, NewUserDoc, UserPatchDoc, DetailsDoc, UserDetailsDoc, DirectoryUserDoc)),
    tags((name = "health"), (name = "users"), (name = "details"))
)]
pub struct DirectoryDoc;

pub fn for_service(kind: ServiceKind) -> utoipa::openapi::OpenApi {
    match kind {
        ServiceKind::Library => LibraryDoc::openapi(),
        ServiceKind::Profiles => ProfilesDoc::openapi(),
        ServiceKind::Directory => DirectoryDoc::openapi(),
    }
}
