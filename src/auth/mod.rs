//! Authentication and authorization.
//!
//! Two ways to authenticate a request:
//!
//! 1. **Session cookie** - browsers log in via `/authentication/login` and get
//!    an HTTP-only cookie holding a signed JWT.
//! 2. **Bearer token** - the same JWT passed in an `Authorization: Bearer`
//!    header, for programmatic clients.
//!
//! Authorization is role-based (ADMIN / EMPLOYEE / STUDENT) plus ownership:
//! users can always see and cancel their own bookings, admins can act on
//! everything.
//!
//! - [`current_user`]: extractor for the authenticated user in handlers
//! - [`password`]: password hashing and verification using Argon2
//! - [`session`]: JWT session token creation and verification

pub mod current_user;
pub mod password;
pub mod session;
