mod timeout_worker;

pub use timeout_worker::RequestTimeoutWorker;
