//! Key-scan controller interrupt line
//!
//! Only records that the controller has data. All bus traffic happens in
//! the input task.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::KEY_IRQ;

/// Wait for falling edges on the controller INT line
#[embassy_executor::task]
pub async fn key_irq_task(mut int: Input<'static>) {
    info!("Key interrupt task started");

    // Events queued before this task started
    if int.is_low() {
        KEY_IRQ.notify();
    }

    loop {
        int.wait_for_falling_edge().await;
        KEY_IRQ.notify();
    }
}
