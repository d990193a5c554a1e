//! Native test-suite. Browser-only checks live next to the code they cover
//! behind `cfg(target_arch = "wasm32")`.


mod api_modules_tests;
