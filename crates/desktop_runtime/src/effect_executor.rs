//! Drains the reducer's effect queue into the host.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor that runs queued [`crate::RuntimeEffect`] values in emission order.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }

        // Host effects may dispatch again while the batch runs (a refused URL open reports back
        // synchronously, observers may toggle windows). Keep draining until the queue stays empty.
        let host = runtime.host.get_value();
        loop {
            let queued = runtime.effects.get_untracked();
            if queued.is_empty() {
                break;
            }
            runtime.effects.set(Vec::new());
            for effect in queued {
                host.run_runtime_effect(runtime, effect);
            }
        }
    });
}
