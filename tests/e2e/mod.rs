// End-to-end tests for the markdown reader
//
// Each test gets its own temporary workspace (content tree, settings file and
// audio cache) through test-context lifecycle hooks. The speech backend and the
// concatenation tool are in-process fakes, so no network access or ffmpeg
// install is needed.

mod test_assembly;
mod test_locator;
mod test_reading;
