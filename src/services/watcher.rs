use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Вызывается при каждом изменении файла
pub type ReloadCallback = Box<dyn FnMut() -> anyhow::Result<()> + Send + 'static>;

/// Опрашивает время изменения файла профилей и вызывает колбэк при его смене
pub struct StoreWatcher {
    path: PathBuf,
    interval: Duration,
}

/// Запущенный наблюдатель
pub struct WatcherHandle {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

fn modified(path: &Path) -> std::io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}

impl StoreWatcher {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
        }
    }

    /// Запустить опрос в отдельной задаче tokio
    pub fn spawn(self, callback: ReloadCallback) -> WatcherHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(self.run(callback, stop_rx));
        WatcherHandle { stop_tx, handle }
    }

    async fn run(self, mut callback: ReloadCallback, mut stop_rx: watch::Receiver<bool>) {
        info!("Наблюдение за {:?} (интервал {:?})", self.path, self.interval);

        let mut last_seen = modified(&self.path).ok();
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // первый тик interval срабатывает сразу
        ticker.tick().await;

        loop {
            tokio::select! {
                // остановка важнее очередного тика
                biased;
                _ = stop_rx.changed() => break,
                _ = ticker.tick() => self.poll(&mut last_seen, &mut callback),
            }
        }

        info!("Наблюдение за {:?} остановлено", self.path);
    }

    fn poll(&self, last_seen: &mut Option<SystemTime>, callback: &mut ReloadCallback) {
        let stamp = match modified(&self.path) {
            Ok(stamp) => stamp,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{:?} отсутствует, пропускаем опрос", self.path);
                return;
            }
            Err(e) => {
                warn!("Не удалось прочитать время изменения {:?}: {}", self.path, e);
                return;
            }
        };

        if *last_seen == Some(stamp) {
            return;
        }
        *last_seen = Some(stamp);

        info!("Файл {:?} изменён, перезагрузка", self.path);
        if let Err(e) = callback() {
            error!("Ошибка при перезагрузке {:?}: {:#}", self.path, e);
        }
    }
}

impl WatcherHandle {
    /// Остановить опрос; текущий опрос (если идёт) завершается, следующего не будет
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.handle.await {
            error!("Задача наблюдения завершилась с ошибкой: {}", e);
        }
    }
}
