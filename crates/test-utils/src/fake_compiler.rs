use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shaderbuild::compile::backend::CompileFuture;
use shaderbuild::compile::{CompileInvocation, CompilerBackend};

type Hook = Box<dyn Fn(&CompileInvocation) + Send + Sync>;

/// A fake compiler that:
/// - records every invocation it receives
/// - fails for the file names registered with [`FakeCompiler::failing`]
/// - optionally sleeps, to make concurrency observable
/// - tracks the peak number of compiles running at the same time
#[derive(Default)]
pub struct FakeCompiler {
    invocations: Mutex<Vec<CompileInvocation>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    on_compile: Option<Hook>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make compiles of `file` fail with `"<file>: syntax error"`.
    pub fn failing(mut self, file: &str) -> Self {
        self.failing.insert(file.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Run `hook` while the compile is "in progress".
    pub fn on_compile(mut self, hook: impl Fn(&CompileInvocation) + Send + Sync + 'static) -> Self {
        self.on_compile = Some(Box::new(hook));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn invocations(&self) -> Vec<CompileInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// File names compiled so far, sorted.
    pub fn compiled_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .invocations
            .lock()
            .unwrap()
            .iter()
            .map(|inv| inv.file.clone())
            .collect();
        files.sort();
        files
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CompilerBackend for FakeCompiler {
    fn compile<'a>(&'a self, invocation: &'a CompileInvocation) -> CompileFuture<'a> {
        Box::pin(async move {
            {
                let mut guard = self.invocations.lock().unwrap();
                guard.push(invocation.clone());
            }

            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            if let Some(hook) = &self.on_compile {
                hook(invocation);
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.running.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&invocation.file) {
                anyhow::bail!("{}: syntax error", invocation.file);
            }
            Ok(())
        })
    }
}
