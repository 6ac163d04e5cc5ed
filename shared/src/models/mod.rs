//! Wire-level models shared between server and clients

pub mod notification;
pub mod reservation;
pub mod table_order;

pub use notification::{NotificationKind, RecipientScope};
pub use reservation::{
    CreateReservationRequest, ReservationStatus, UpdateReservationRequest,
};
pub use table_order::{
    CreateTableOrderRequest, OrderLineInput, PaymentStatus, TableOrderStatus,
    UpdateOrderLinesRequest,
};
