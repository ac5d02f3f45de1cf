use medcalc_calculators::form::FormOptions;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Holds no form state: every calculation request gets its own controller.
#[derive(Clone, Default)]
pub struct AppState {
    pub form_options: FormOptions,
}
