pub mod clock;
pub use clock::ReceiptTime;
