//! Wire format of the study backend.

mod messages;

pub use messages::{
    ClarifyForm, ClarifyResponse, DeleteRequest, DeleteResponse, ErrorBody, GenerateResponse,
    HistoryRecord, HistoryResponse, endpoints, fields,
};
