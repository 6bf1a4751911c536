//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{GetClients, GetDidsInfo, GetRegistrationStatus, GetServersInfo, SetDidPop};
pub(crate) use response::is_truthy_token;
pub use response::{
    ClientsResponse, DidInfo, DidsInfoResponse, Registration, RegistrationStatusResponse,
    ResponseEnvelope, ServerInfo, ServersInfoResponse,
};
pub use validation::ValidationError;
pub use value::{Account, ApiPassword, ApiUsername, ClientId, Did, Pop, ServerHostname};
