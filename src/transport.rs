use crate::constants::*;
use crate::dispatch::CommandSink;
use crate::error::LinkError;
use crate::packet::BlueboyCommand;
use btleplug::api::{Central, CharPropFlags, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType};
use btleplug::platform::{Manager, Peripheral};
use futures::stream::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info};

pub enum Transport {
    Bluetooth {
        device: Peripheral,
        characteristic: Characteristic,
        write_type: WriteType,
    },
    /// Keeps written packets in memory, for simulators and tests.
    Loopback(Arc<Mutex<Vec<Vec<u8>>>>),
}

impl Transport {
    pub fn loopback() -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
        let packets = Arc::new(Mutex::new(Vec::new()));
        (Transport::Loopback(Arc::clone(&packets)), packets)
    }

    /// Scan for a BLE serial module advertising `name` and open its data
    /// characteristic.
    pub async fn connect(name: &str, scan_timeout: Duration) -> Result<Self, LinkError> {
        let manager = Manager::new().await?;
        let adapters = manager.adapters().await?;
        let adapter = adapters.into_iter().next().ok_or(LinkError::NoAdapter)?;

        adapter.start_scan(ScanFilter::default()).await?;

        let mut events = adapter.events().await?;
        let deadline = Instant::now() + scan_timeout;

        info!("Scanning for {}...", name);

        let mut found_device = None;
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, events.next()).await {
            if let btleplug::api::CentralEvent::DeviceDiscovered(id) = event {
                let peripheral = adapter.peripheral(&id).await?;
                if let Ok(Some(properties)) = peripheral.properties().await {
                    if properties.local_name.as_deref() == Some(name) {
                        found_device = Some(peripheral);
                        break;
                    }
                }
            }
        }

        adapter.stop_scan().await?;

        let device = found_device.ok_or_else(|| LinkError::NotFound(name.to_string()))?;
        device.connect().await?;
        device.discover_services().await?;

        let characteristic = device
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == CHARACTERISTIC_UUID && c.service_uuid == SERVICE_UUID)
            .ok_or(LinkError::NoCharacteristic)?;

        let write_type = if characteristic.properties.contains(CharPropFlags::WRITE_WITHOUT_RESPONSE) {
            WriteType::WithoutResponse
        } else {
            WriteType::WithResponse
        };

        info!("Connected to {} via Bluetooth", name);
        Ok(Transport::Bluetooth {
            device,
            characteristic,
            write_type,
        })
    }

    pub async fn send(&self, packet: &[u8]) -> Result<(), LinkError> {
        match self {
            Transport::Bluetooth {
                device,
                characteristic,
                write_type,
            } => {
                for chunk in packet.chunks(BLE_CHUNK_LEN) {
                    device.write(characteristic, chunk, *write_type).await?;
                }
                Ok(())
            }
            Transport::Loopback(packets) => {
                packets.lock().push(packet.to_vec());
                Ok(())
            }
        }
    }

    pub async fn disconnect(&self) -> Result<(), LinkError> {
        if let Transport::Bluetooth { device, .. } = self {
            device.disconnect().await?;
        }
        Ok(())
    }
}

/// Command sink that frames each command and writes it to the vehicle,
/// blocking until the write completes.
pub struct PacketSink {
    runtime: Runtime,
    transport: Transport,
    sent: usize,
    failures: usize,
}

impl PacketSink {
    pub fn new(runtime: Runtime, transport: Transport) -> Self {
        PacketSink {
            runtime,
            transport,
            sent: 0,
            failures: 0,
        }
    }

    pub fn connect(name: &str, scan_timeout: Duration) -> Result<Self, LinkError> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let transport = runtime.block_on(Transport::connect(name, scan_timeout))?;
        Ok(PacketSink::new(runtime, transport))
    }

    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn close(self) -> Result<(), LinkError> {
        self.runtime.block_on(self.transport.disconnect())
    }

    fn try_send(&self, text: &str) -> Result<(), LinkError> {
        let command = BlueboyCommand::parse(text)?;
        let packet = command.encode();
        debug!(id = command.id(), "Sending packet {:02x?}", packet);
        self.runtime.block_on(self.transport.send(&packet))
    }
}

impl CommandSink for PacketSink {
    fn send_command(&mut self, text: &str) {
        match self.try_send(text) {
            Ok(()) => self.sent += 1,
            Err(e) => {
                error!(command = text, "Failed to send command: {}", e);
                self.failures += 1;
            }
        }
    }
}
