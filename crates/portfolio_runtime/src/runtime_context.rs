//! Runtime provider and context wiring for the desktop.
//!
//! [`DesktopProvider`] owns the reducer container and the runtime effect queue, hydrates the
//! saved icon layout on boot, and executes reducer-emitted effects against the injected
//! [`HostServices`]. Components reach the runtime through [`use_desktop_runtime`].

use leptos::*;
use portfolio_host::HostServices;

use crate::{
    icon_layout::Placement,
    persistence,
    reducer::{reduce_desktop, DesktopAction, DesktopState, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle used to run side effects.
    pub host: StoredValue<HostServices>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Effects emitted by the reducer and not yet executed.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

fn install_boot_hydration(host: StoredValue<HostServices>, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let services = host.get_value();
        spawn_local(async move {
            match persistence::load_icon_layout(services.storage.as_ref()).await {
                Ok(Some(icons)) => dispatch.call(DesktopAction::HydrateIconLayout { icons }),
                Ok(None) => {}
                Err(err) => logging::warn!("icon layout hydrate failed: {err}"),
            }
        });
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::PersistIconLayout => {
            let services = runtime.host.get_value();
            let icons = runtime.state.with_untracked(|desktop| desktop.icons.clone());
            spawn_local(async move {
                if let Err(err) =
                    persistence::persist_icon_layout(services.storage.as_ref(), &icons).await
                {
                    logging::warn!("icon layout persist failed: {err}");
                }
            });
        }
        RuntimeEffect::ClearIconLayout => {
            let services = runtime.host.get_value();
            spawn_local(async move {
                if let Err(err) = persistence::clear_icon_layout(services.storage.as_ref()).await {
                    logging::warn!("icon layout clear failed: {err}");
                }
            });
        }
        RuntimeEffect::OpenExternalUrl(url) => {
            let services = runtime.host.get_value();
            spawn_local(async move {
                if let Err(err) = services.external_urls.open_url(&url).await {
                    logging::warn!("open external url `{url}` failed: {err}");
                }
            });
        }
        RuntimeEffect::IconPlaced {
            icon_id,
            placement: Placement::NoSpaceFound(cell),
        } => logging::warn!(
            "no free desktop cell near ({}, {}); `{icon_id}` overlaps",
            cell.grid_x,
            cell.grid_y
        ),
        RuntimeEffect::IconPlaced { .. } => {}
    }
}

fn install_effect_executor(runtime: DesktopRuntimeContext) {
    // Clear the queue before draining so nested dispatches enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected browser or in-memory host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(host_services);
    let state = create_rw_signal(DesktopState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        let new_effects = reduce_desktop(&mut desktop, action);
        if desktop != previous {
            state.set(desktop);
        }
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime);

    install_boot_hydration(host, dispatch);
    install_effect_executor(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
