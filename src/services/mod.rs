//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and use the Unit of Work for centralized
//! repository access and transaction management.

mod assignment_service;
pub mod container;
mod fleet_service;
mod network_service;
pub mod reports;
mod trip_service;
mod user_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use assignment_service::{AssignmentManager, AssignmentService};
pub use fleet_service::{FleetManager, FleetService};
pub use network_service::{NetworkManager, NetworkService};
pub use reports::{ActiveAssignment, ItinerarySummary, LineActivity, QueryFacade, TripProgress};
pub use trip_service::{TripManager, TripService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use assignment_service::MockAssignmentService;
#[cfg(any(test, feature = "test-utils"))]
pub use fleet_service::MockFleetService;
#[cfg(any(test, feature = "test-utils"))]
pub use network_service::MockNetworkService;
#[cfg(any(test, feature = "test-utils"))]
pub use trip_service::MockTripService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
