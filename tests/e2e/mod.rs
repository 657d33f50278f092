// End-to-end tests for the Polyglot Audio Backend HTTP API
//
// Each test starts the real axum router on an ephemeral port with its own
// temporary output and upload directories. Providers and the job store are
// replaced by in-memory doubles, so the suite needs neither network access
// nor a database and tests run in parallel.

mod test_upload;
