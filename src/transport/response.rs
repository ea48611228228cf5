use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Result of one service call together with the HTTP metadata it arrived with.
#[derive(Debug)]
pub struct DetailedResponse<T> {
    pub result: T,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl<T> DetailedResponse<T> {
    pub fn new(result: T, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            result,
            status,
            headers,
        }
    }

    pub fn into_result(self) -> T {
        self.result
    }

    /// Value of a response header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Service-assigned transaction id, useful when reporting problems to the provider.
    pub fn transaction_id(&self) -> Option<&str> {
        self.header("x-global-transaction-id")
            .or_else(|| self.header("x-dp-watson-tran-id"))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            result: f(self.result),
            status: self.status,
            headers: self.headers,
        }
    }
}
