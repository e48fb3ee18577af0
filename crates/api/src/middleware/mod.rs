pub mod portal_user;

pub use portal_user::PortalUser;
