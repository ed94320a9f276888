use log::warn;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Ejecuta `job` en un hilo aparte y devuelve el canal por el que llegará el resultado.
/// Al terminar pide un repintado para que la UI lo recoja sin esperar a un evento.
pub fn spawn_request<T, F>(ctx: &egui::Context, job: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        let result = job();
        // el receptor se descarta si la vista ya no espera este resultado
        if tx.send(result).is_err() {
            warn!("resultado de red descartado: nadie lo esperaba");
        }
        ctx.request_repaint();
    });

    rx
}

/// Estado de un canal pendiente tras un `try_recv`.
pub enum Poll<T> {
    Ready(T),
    Pending,
    Lost,
}

pub fn poll<T>(slot: &mut Option<Receiver<T>>) -> Poll<T> {
    let Some(rx) = slot.as_ref() else {
        return Poll::Pending;
    };

    match rx.try_recv() {
        Ok(value) => {
            *slot = None;
            Poll::Ready(value)
        }
        Err(TryRecvError::Empty) => Poll::Pending,
        Err(TryRecvError::Disconnected) => {
            *slot = None;
            Poll::Lost
        }
    }
}
