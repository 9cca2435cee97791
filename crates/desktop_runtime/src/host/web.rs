use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use chrono::Local;
use leptos::logging;
use platform_host_web::{
    read_file_as_data_url_then, IntervalHandle, WebDocumentAppearance, WebSlotStore,
    ONE_SECOND_MS,
};

use super::{PomodoroTicker, TickerScheduler};
use crate::{
    config::ShellConfig,
    reducer::{DesktopAction, ReducerError},
    runtime::DesktopRuntime,
    view::DesktopView,
};

type WebRuntime = DesktopRuntime<WebSlotStore, WebDocumentAppearance>;

struct ShellInner {
    runtime: RefCell<WebRuntime>,
    pomodoro: RefCell<PomodoroTicker<IntervalScheduler>>,
    on_render: Box<dyn Fn(DesktopView)>,
}

struct IntervalScheduler {
    shell: Weak<ShellInner>,
}

impl TickerScheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn start_pomodoro_ticker(&mut self) -> Result<IntervalHandle, String> {
        let shell = self.shell.clone();
        IntervalHandle::start(ONE_SECOND_MS, move || {
            if let Some(shell) = shell.upgrade() {
                shell.pomodoro_tick();
            }
        })
    }
}

impl ShellInner {
    fn render(&self) {
        let view = self.runtime.borrow().render(Local::now());
        (self.on_render)(view);
    }

    fn dispatch(&self, action: DesktopAction) -> Result<(), ReducerError> {
        let effects = {
            let mut runtime = self.runtime.borrow_mut();
            runtime.dispatch(action, Local::now())?;
            runtime.drain_shell_effects()
        };
        self.pomodoro.borrow_mut().apply(effects);
        self.render();
        Ok(())
    }

    fn clock_tick(&self) {
        self.runtime.borrow_mut().tick(Local::now());
        self.render();
    }

    fn pomodoro_tick(self: &Rc<Self>) {
        let effects = {
            let mut runtime = self.runtime.borrow_mut();
            runtime.pomodoro_tick(Local::now());
            runtime.drain_shell_effects()
        };
        self.render();
        if effects.is_empty() {
            return;
        }
        // The stop effect drops the interval running this callback; clear it on a later turn.
        let shell = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            shell.pomodoro.borrow_mut().apply(effects);
        });
    }
}

/// Browser desktop session: the runtime plus the intervals that drive it.
///
/// Dropping the shell clears every interval it installed.
pub struct DesktopShell {
    inner: Rc<ShellInner>,
    _clock: IntervalHandle,
    _countdown_refresh: IntervalHandle,
}

impl DesktopShell {
    /// Boots the runtime against `localStorage` and installs the fixed one-second intervals.
    ///
    /// `on_render` receives a fresh view after every dispatch and tick.
    pub fn boot<F>(config: ShellConfig, on_render: F) -> Result<Self, String>
    where
        F: Fn(DesktopView) + 'static,
    {
        let inner = Rc::new_cyclic(|shell: &Weak<ShellInner>| ShellInner {
            runtime: RefCell::new(DesktopRuntime::web(config, Local::now())),
            pomodoro: RefCell::new(PomodoroTicker::new(IntervalScheduler {
                shell: shell.clone(),
            })),
            on_render: Box::new(on_render),
        });

        let boot_effects = inner.runtime.borrow_mut().drain_shell_effects();
        inner.pomodoro.borrow_mut().apply(boot_effects);

        let clock = {
            let shell = Rc::downgrade(&inner);
            IntervalHandle::start(ONE_SECOND_MS, move || {
                if let Some(shell) = shell.upgrade() {
                    shell.clock_tick();
                }
            })?
        };
        let countdown_refresh = {
            let shell = Rc::downgrade(&inner);
            IntervalHandle::start(ONE_SECOND_MS, move || {
                if let Some(shell) = shell.upgrade() {
                    shell.render();
                }
            })?
        };

        inner.render();
        logging::log!("desktop shell installed");
        Ok(Self {
            inner,
            _clock: clock,
            _countdown_refresh: countdown_refresh,
        })
    }

    pub fn dispatch(&self, action: DesktopAction) -> Result<(), ReducerError> {
        self.inner.dispatch(action)
    }

    pub fn view(&self) -> DesktopView {
        self.inner.runtime.borrow().render(Local::now())
    }

    /// Reads a picked file and installs it as the wallpaper once the read settles.
    pub fn upload_wallpaper(&self, file: web_sys::File) {
        let shell = Rc::downgrade(&self.inner);
        read_file_as_data_url_then(file, move |result| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            match result {
                Ok(data_url) => {
                    if let Err(err) = shell.dispatch(DesktopAction::SetWallpaperImage { data_url })
                    {
                        logging::warn!("wallpaper upload rejected: {err}");
                    }
                }
                Err(err) => logging::warn!("wallpaper upload failed: {err}"),
            }
        });
    }
}
