//! Pure aggregate logic: money arithmetic, the order aggregate and its
//! items, the product stock guard, and the store ports the application
//! layer depends on. No I/O happens here.

pub mod money;
pub mod order;
pub mod ports;
pub mod product;
