//! The wire message catalog.
//!
//! Requests originate from the host, responses from the device; a response
//! tag is its request tag with the high bit set. `Message` covers the whole
//! catalog and knows how to encode itself into a complete frame and decode
//! its body once the frame layer has validated length and CRC.

use crate::command;
use crate::error::{BodyError, EncodeError};
use crate::frame::FRAME_OVERHEAD;
use bytestream::{ByteReader, ByteWriter};
use types::{
    Attribute, FileInfo, FileName, PulseRaw, PulseRawAll, PulseRawList, Recording, Reporting,
};

/// Wire message type bytes.
pub mod msg_type {
    pub const HEARTBEAT: u8 = 0x01;
    pub const SET_ATTRIBUTE: u8 = 0x11;
    pub const GET_ATTRIBUTE: u8 = 0x12;
    pub const RESET_ATTRIBUTE: u8 = 0x13;
    pub const CONFIGURE_REPORTING: u8 = 0x14;
    pub const RESET_REPORTING: u8 = 0x15;
    pub const PERIODIC_RECORDING: u8 = 0x16;
    pub const ATTRIBUTE_CHANGED: u8 = 0x21;
    pub const RAW_PULSE_CHANGED: u8 = 0x22;
    pub const RAW_PULSE_LIST_CHANGED: u8 = 0x24;
    pub const ALARM: u8 = 0x31;
    pub const LIST_FILES: u8 = 0x41;
    pub const GET_FILE: u8 = 0x42;
    pub const SEND_FILE: u8 = 0x43;
    pub const DELETE_FILE: u8 = 0x44;
    pub const GET_FILE_UART: u8 = 0x45;
    pub const REFORMAT_DISK: u8 = 0x47;
    pub const EXECUTE_COMMAND: u8 = 0x51;

    pub const HEARTBEAT_RESPONSE: u8 = 0x81;
    pub const NACK_RESPONSE: u8 = 0x82;
    pub const SET_ATTRIBUTE_RESPONSE: u8 = 0x91;
    pub const GET_ATTRIBUTE_RESPONSE: u8 = 0x92;
    pub const RESET_ATTRIBUTE_RESPONSE: u8 = 0x93;
    pub const CONFIGURE_REPORTING_RESPONSE: u8 = 0x94;
    pub const RESET_REPORTING_RESPONSE: u8 = 0x95;
    pub const PERIODIC_RECORDING_RESPONSE: u8 = 0x96;
    pub const ATTRIBUTE_CHANGED_RESPONSE: u8 = 0xA1;
    pub const RAW_PULSE_CHANGED_RESPONSE: u8 = 0xA2;
    pub const RAW_PULSE_LIST_CHANGED_RESPONSE: u8 = 0xA4;
    pub const ALARM_RESPONSE: u8 = 0xB1;
    pub const LIST_FILES_RESPONSE: u8 = 0xC1;
    pub const GET_FILE_RESPONSE: u8 = 0xC2;
    pub const SEND_FILE_RESPONSE: u8 = 0xC3;
    pub const DELETE_FILE_RESPONSE: u8 = 0xC4;
    pub const GET_FILE_UART_RESPONSE: u8 = 0xC5;
    pub const FILE_DATA_CHUNK: u8 = 0xC6;
    pub const REFORMAT_DISK_RESPONSE: u8 = 0xC7;
    pub const EXECUTE_COMMAND_RESPONSE: u8 = 0xD1;

    /// Every assigned message type, used to assert uniqueness.
    pub const ALL: [u8; 38] = [
        HEARTBEAT,
        SET_ATTRIBUTE,
        GET_ATTRIBUTE,
        RESET_ATTRIBUTE,
        CONFIGURE_REPORTING,
        RESET_REPORTING,
        PERIODIC_RECORDING,
        ATTRIBUTE_CHANGED,
        RAW_PULSE_CHANGED,
        RAW_PULSE_LIST_CHANGED,
        ALARM,
        LIST_FILES,
        GET_FILE,
        SEND_FILE,
        DELETE_FILE,
        GET_FILE_UART,
        REFORMAT_DISK,
        EXECUTE_COMMAND,
        HEARTBEAT_RESPONSE,
        NACK_RESPONSE,
        SET_ATTRIBUTE_RESPONSE,
        GET_ATTRIBUTE_RESPONSE,
        RESET_ATTRIBUTE_RESPONSE,
        CONFIGURE_REPORTING_RESPONSE,
        RESET_REPORTING_RESPONSE,
        PERIODIC_RECORDING_RESPONSE,
        ATTRIBUTE_CHANGED_RESPONSE,
        RAW_PULSE_CHANGED_RESPONSE,
        RAW_PULSE_LIST_CHANGED_RESPONSE,
        ALARM_RESPONSE,
        LIST_FILES_RESPONSE,
        GET_FILE_RESPONSE,
        SEND_FILE_RESPONSE,
        DELETE_FILE_RESPONSE,
        GET_FILE_UART_RESPONSE,
        FILE_DATA_CHUNK,
        REFORMAT_DISK_RESPONSE,
        EXECUTE_COMMAND_RESPONSE,
    ];
}

/// Why the device refused a request.
pub mod nack {
    pub const UNKNOWN_MESSAGE_TYPE: u8 = 0x01;
    pub const UNKNOWN_MESSAGE_CONTENT: u8 = 0x02;
    pub const UNKNOWN_ATTRIBUTE: u8 = 0x03;
    pub const MESSAGE_TOO_SHORT: u8 = 0x04;
    pub const MESSAGE_TOO_LONG: u8 = 0x05;
    pub const ILLEGAL_CRC: u8 = 0x06;
    pub const BUFFER_FULL: u8 = 0x07;
    pub const FILE_SYSTEM_ERROR: u8 = 0x08;
    pub const DELETE_FILE_ERROR: u8 = 0x09;
    pub const FILE_NOT_FOUND: u8 = 0x0A;
    pub const RETRANSMIT_FAILED: u8 = 0x0B;
    pub const FILE_NOT_OPENED: u8 = 0x0C;

    /// Human-readable text for a nack code, `None` if unassigned.
    #[must_use]
    pub const fn error_message(code: u8) -> Option<&'static str> {
        match code {
            UNKNOWN_MESSAGE_TYPE => Some("Unknown message type"),
            UNKNOWN_MESSAGE_CONTENT => Some("Unknown message content"),
            UNKNOWN_ATTRIBUTE => Some("Unknown attribute"),
            MESSAGE_TOO_SHORT => Some("Message too short"),
            MESSAGE_TOO_LONG => Some("Message too long"),
            ILLEGAL_CRC => Some("Message with illegal CRC"),
            BUFFER_FULL => Some("Message buffer full"),
            FILE_SYSTEM_ERROR => Some("File system error"),
            DELETE_FILE_ERROR => Some("Delete file error"),
            FILE_NOT_FOUND => Some("File not found"),
            RETRANSMIT_FAILED => Some("Retransmit failed"),
            FILE_NOT_OPENED => Some("File not opened"),
            _ => None,
        }
    }
}

/// A raw pulse notification body: one PPG wavelength or all three.
///
/// The wire carries no discriminator; the shape is chosen by the residual
/// body length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPulse {
    Single(PulseRaw),
    All(PulseRawAll),
}

/// A decoded wire message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Heartbeat,
    HeartbeatResponse,
    NackResponse {
        response_code: u8,
    },
    SetAttribute {
        attribute_id: u8,
        value: Option<Attribute>,
    },
    SetAttributeResponse,
    GetAttribute {
        attribute_id: u8,
    },
    GetAttributeResponse {
        attribute_id: u8,
        changed_at: u64,
        reporting: Reporting,
        value: Option<Attribute>,
    },
    ResetAttribute {
        attribute_id: u8,
    },
    ResetAttributeResponse,
    ConfigureReporting {
        attribute_id: u8,
        reporting: Reporting,
    },
    ConfigureReportingResponse,
    ResetReporting {
        attribute_id: u8,
    },
    ResetReportingResponse,
    PeriodicRecording {
        recording: Recording,
    },
    PeriodicRecordingResponse,
    AttributeChanged {
        changed_at: u64,
        attribute_id: u8,
        value: Option<Attribute>,
    },
    AttributeChangedResponse,
    RawPulseChanged {
        tick: u16,
        pulse: RawPulse,
    },
    RawPulseChangedResponse,
    RawPulseListChanged {
        attribute_id: u8,
        list: PulseRawList,
    },
    RawPulseListChangedResponse,
    Alarm {
        changed_at: u64,
        alarm_type: u8,
    },
    AlarmResponse,
    ListFiles,
    ListFilesResponse {
        files: Vec<FileInfo>,
    },
    GetFile {
        name: FileName,
    },
    GetFileResponse,
    SendFile {
        name: FileName,
        index: u16,
        total_parts: u16,
        payload: Vec<u8>,
    },
    SendFileResponse {
        crc: u16,
    },
    DeleteFile {
        name: FileName,
    },
    DeleteFileResponse,
    GetFileUart {
        name: FileName,
    },
    GetFileUartResponse,
    FileDataChunk {
        fileref: u8,
        /// Byte offset into the file, little-endian on the wire.
        offset: u32,
        payload: Vec<u8>,
    },
    ReformatDisk,
    ReformatDiskResponse,
    ExecuteCommand {
        command_id: u8,
        payload: Vec<u8>,
    },
    ExecuteCommandResponse {
        response_code: u8,
        payload: Vec<u8>,
    },
}

impl Message {
    /// The wire type byte of this message.
    #[must_use]
    pub const fn msg_type(&self) -> u8 {
        match self {
            Self::Heartbeat => msg_type::HEARTBEAT,
            Self::HeartbeatResponse => msg_type::HEARTBEAT_RESPONSE,
            Self::NackResponse { .. } => msg_type::NACK_RESPONSE,
            Self::SetAttribute { .. } => msg_type::SET_ATTRIBUTE,
            Self::SetAttributeResponse => msg_type::SET_ATTRIBUTE_RESPONSE,
            Self::GetAttribute { .. } => msg_type::GET_ATTRIBUTE,
            Self::GetAttributeResponse { .. } => msg_type::GET_ATTRIBUTE_RESPONSE,
            Self::ResetAttribute { .. } => msg_type::RESET_ATTRIBUTE,
            Self::ResetAttributeResponse => msg_type::RESET_ATTRIBUTE_RESPONSE,
            Self::ConfigureReporting { .. } => msg_type::CONFIGURE_REPORTING,
            Self::ConfigureReportingResponse => msg_type::CONFIGURE_REPORTING_RESPONSE,
            Self::ResetReporting { .. } => msg_type::RESET_REPORTING,
            Self::ResetReportingResponse => msg_type::RESET_REPORTING_RESPONSE,
            Self::PeriodicRecording { .. } => msg_type::PERIODIC_RECORDING,
            Self::PeriodicRecordingResponse => msg_type::PERIODIC_RECORDING_RESPONSE,
            Self::AttributeChanged { .. } => msg_type::ATTRIBUTE_CHANGED,
            Self::AttributeChangedResponse => msg_type::ATTRIBUTE_CHANGED_RESPONSE,
            Self::RawPulseChanged { .. } => msg_type::RAW_PULSE_CHANGED,
            Self::RawPulseChangedResponse => msg_type::RAW_PULSE_CHANGED_RESPONSE,
            Self::RawPulseListChanged { .. } => msg_type::RAW_PULSE_LIST_CHANGED,
            Self::RawPulseListChangedResponse => msg_type::RAW_PULSE_LIST_CHANGED_RESPONSE,
            Self::Alarm { .. } => msg_type::ALARM,
            Self::AlarmResponse => msg_type::ALARM_RESPONSE,
            Self::ListFiles => msg_type::LIST_FILES,
            Self::ListFilesResponse { .. } => msg_type::LIST_FILES_RESPONSE,
            Self::GetFile { .. } => msg_type::GET_FILE,
            Self::GetFileResponse => msg_type::GET_FILE_RESPONSE,
            Self::SendFile { .. } => msg_type::SEND_FILE,
            Self::SendFileResponse { .. } => msg_type::SEND_FILE_RESPONSE,
            Self::DeleteFile { .. } => msg_type::DELETE_FILE,
            Self::DeleteFileResponse => msg_type::DELETE_FILE_RESPONSE,
            Self::GetFileUart { .. } => msg_type::GET_FILE_UART,
            Self::GetFileUartResponse => msg_type::GET_FILE_UART_RESPONSE,
            Self::FileDataChunk { .. } => msg_type::FILE_DATA_CHUNK,
            Self::ReformatDisk => msg_type::REFORMAT_DISK,
            Self::ReformatDiskResponse => msg_type::REFORMAT_DISK_RESPONSE,
            Self::ExecuteCommand { .. } => msg_type::EXECUTE_COMMAND,
            Self::ExecuteCommandResponse { .. } => msg_type::EXECUTE_COMMAND_RESPONSE,
        }
    }

    /// Encodes this message into a complete frame: type byte, total length,
    /// body and trailing CRC.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut body = ByteWriter::new();
        self.encode_body(&mut body)?;
        let body = body.finish();

        let total = body.len() + FRAME_OVERHEAD;
        if total > usize::from(u16::MAX) {
            return Err(EncodeError::BodyTooLong { length: body.len() });
        }

        let mut frame = ByteWriter::with_capacity(total);
        frame.write_u8(self.msg_type());
        frame.write_u16_be(total as u16);
        frame.write_bytes(&body);
        let crc = crc::crc16(frame.as_bytes());
        frame.write_u16_be(crc);
        Ok(frame.finish())
    }

    fn encode_body(&self, writer: &mut ByteWriter) -> Result<(), EncodeError> {
        match self {
            Self::Heartbeat
            | Self::HeartbeatResponse
            | Self::SetAttributeResponse
            | Self::ResetAttributeResponse
            | Self::ConfigureReportingResponse
            | Self::ResetReportingResponse
            | Self::PeriodicRecordingResponse
            | Self::AttributeChangedResponse
            | Self::RawPulseChangedResponse
            | Self::RawPulseListChangedResponse
            | Self::AlarmResponse
            | Self::ListFiles
            | Self::GetFileResponse
            | Self::DeleteFileResponse
            | Self::GetFileUartResponse
            | Self::ReformatDisk
            | Self::ReformatDiskResponse => {}

            Self::NackResponse { response_code } => writer.write_u8(*response_code),

            Self::SetAttribute {
                attribute_id,
                value,
            } => {
                let value = required_value(*attribute_id, value)?;
                writer.write_u8(*attribute_id);
                writer.write_u8(value_length_byte(*attribute_id, value)?);
                value.encode_to(writer)?;
            }
            Self::GetAttribute { attribute_id } | Self::ResetAttribute { attribute_id } => {
                writer.write_u8(*attribute_id);
            }
            Self::GetAttributeResponse {
                attribute_id,
                changed_at,
                reporting,
                value,
            } => {
                let value = required_value(*attribute_id, value)?;
                writer.write_u8(*attribute_id);
                writer.write_u64_be(*changed_at);
                reporting.encode_to(writer);
                writer.write_u8(value_length_byte(*attribute_id, value)?);
                value.encode_to(writer)?;
            }
            Self::ConfigureReporting {
                attribute_id,
                reporting,
            } => {
                writer.write_u8(*attribute_id);
                reporting.encode_to(writer);
            }
            Self::ResetReporting { attribute_id } => writer.write_u8(*attribute_id),
            Self::PeriodicRecording { recording } => recording.encode_to(writer),
            Self::AttributeChanged {
                changed_at,
                attribute_id,
                value,
            } => {
                let value = required_value(*attribute_id, value)?;
                writer.write_u64_be(*changed_at);
                writer.write_u8(*attribute_id);
                writer.write_u8(value_length_byte(*attribute_id, value)?);
                value.encode_to(writer)?;
            }
            Self::RawPulseChanged { tick, pulse } => {
                writer.write_u16_be(*tick);
                match pulse {
                    RawPulse::Single(p) => p.encode_to(writer),
                    RawPulse::All(p) => p.encode_to(writer),
                }
            }
            Self::RawPulseListChanged { attribute_id, list } => {
                writer.write_u8(*attribute_id);
                list.encode_to(writer)?;
            }
            Self::Alarm {
                changed_at,
                alarm_type,
            } => {
                writer.write_u64_be(*changed_at);
                writer.write_u8(*alarm_type);
            }
            Self::ListFilesResponse { files } => {
                for file in files {
                    file.encode_to(writer)?;
                }
            }
            Self::GetFile { name } | Self::DeleteFile { name } | Self::GetFileUart { name } => {
                name.encode_to(writer)?;
            }
            Self::SendFile {
                name,
                index,
                total_parts,
                payload,
            } => {
                name.encode_to(writer)?;
                writer.write_u16_be(*index);
                writer.write_u16_be(*total_parts);
                writer.write_bytes(payload);
            }
            Self::SendFileResponse { crc } => writer.write_u16_be(*crc),
            Self::FileDataChunk {
                fileref,
                offset,
                payload,
            } => {
                writer.write_u8(*fileref);
                writer.write_u32_le(*offset);
                writer.write_bytes(payload);
            }
            Self::ExecuteCommand {
                command_id,
                payload,
            } => {
                command::validate_payload(*command_id, payload)?;
                writer.write_u8(*command_id);
                writer.write_bytes(payload);
            }
            Self::ExecuteCommandResponse {
                response_code,
                payload,
            } => {
                writer.write_u8(*response_code);
                writer.write_bytes(payload);
            }
        }
        Ok(())
    }

    /// Decodes a message body once the frame layer has stripped header and
    /// CRC. `body` is exactly the declared body region. Returns `Ok(None)`
    /// for a type byte outside the catalog.
    pub(crate) fn decode_body(msg_type: u8, body: &[u8]) -> Result<Option<Self>, BodyError> {
        let mut r = ByteReader::new(body);
        let message = match msg_type {
            msg_type::HEARTBEAT => Self::Heartbeat,
            msg_type::HEARTBEAT_RESPONSE => Self::HeartbeatResponse,
            msg_type::NACK_RESPONSE => Self::NackResponse {
                response_code: r.read_u8()?,
            },
            msg_type::SET_ATTRIBUTE => {
                let attribute_id = r.read_u8()?;
                // The declared length byte is advisory; firmware has shipped
                // values that disagree with it, so the id decides the shape.
                let _declared_len = r.read_u8()?;
                Self::SetAttribute {
                    attribute_id,
                    value: Attribute::decode(attribute_id, r.read_rest())?,
                }
            }
            msg_type::SET_ATTRIBUTE_RESPONSE => Self::SetAttributeResponse,
            msg_type::GET_ATTRIBUTE => Self::GetAttribute {
                attribute_id: r.read_u8()?,
            },
            msg_type::GET_ATTRIBUTE_RESPONSE => {
                let attribute_id = r.read_u8()?;
                let changed_at = r.read_u64_be()?;
                let reporting = Reporting::decode(&mut r)?;
                let _declared_len = r.read_u8()?;
                Self::GetAttributeResponse {
                    attribute_id,
                    changed_at,
                    reporting,
                    value: Attribute::decode(attribute_id, r.read_rest())?,
                }
            }
            msg_type::RESET_ATTRIBUTE => Self::ResetAttribute {
                attribute_id: r.read_u8()?,
            },
            msg_type::RESET_ATTRIBUTE_RESPONSE => Self::ResetAttributeResponse,
            msg_type::CONFIGURE_REPORTING => Self::ConfigureReporting {
                attribute_id: r.read_u8()?,
                reporting: Reporting::decode(&mut r)?,
            },
            msg_type::CONFIGURE_REPORTING_RESPONSE => Self::ConfigureReportingResponse,
            msg_type::RESET_REPORTING => Self::ResetReporting {
                attribute_id: r.read_u8()?,
            },
            msg_type::RESET_REPORTING_RESPONSE => Self::ResetReportingResponse,
            msg_type::PERIODIC_RECORDING => Self::PeriodicRecording {
                recording: Recording::decode(&mut r)?,
            },
            msg_type::PERIODIC_RECORDING_RESPONSE => Self::PeriodicRecordingResponse,
            msg_type::ATTRIBUTE_CHANGED => {
                let changed_at = r.read_u64_be()?;
                let attribute_id = r.read_u8()?;
                let _declared_len = r.read_u8()?;
                Self::AttributeChanged {
                    changed_at,
                    attribute_id,
                    value: Attribute::decode(attribute_id, r.read_rest())?,
                }
            }
            msg_type::ATTRIBUTE_CHANGED_RESPONSE => Self::AttributeChangedResponse,
            msg_type::RAW_PULSE_CHANGED => {
                let tick = r.read_u16_be()?;
                let pulse = match r.remaining() {
                    PulseRaw::LEN => RawPulse::Single(PulseRaw::decode(&mut r)?),
                    PulseRawAll::LEN => RawPulse::All(PulseRawAll::decode(&mut r)?),
                    _ => return Err(BodyError::UnexpectedBodyLength { actual: body.len() }),
                };
                Self::RawPulseChanged { tick, pulse }
            }
            msg_type::RAW_PULSE_CHANGED_RESPONSE => Self::RawPulseChangedResponse,
            msg_type::RAW_PULSE_LIST_CHANGED => Self::RawPulseListChanged {
                attribute_id: r.read_u8()?,
                list: PulseRawList::decode(&mut r)?,
            },
            msg_type::RAW_PULSE_LIST_CHANGED_RESPONSE => Self::RawPulseListChangedResponse,
            msg_type::ALARM => Self::Alarm {
                changed_at: r.read_u64_be()?,
                alarm_type: r.read_u8()?,
            },
            msg_type::ALARM_RESPONSE => Self::AlarmResponse,
            msg_type::LIST_FILES => Self::ListFiles,
            msg_type::LIST_FILES_RESPONSE => {
                let mut files = Vec::new();
                while r.remaining() >= FileInfo::LEN {
                    files.push(FileInfo::decode(&mut r)?);
                }
                if !r.is_empty() {
                    return Err(BodyError::UnexpectedBodyLength { actual: body.len() });
                }
                Self::ListFilesResponse { files }
            }
            msg_type::GET_FILE => Self::GetFile {
                name: FileName::decode(&mut r)?,
            },
            msg_type::GET_FILE_RESPONSE => Self::GetFileResponse,
            msg_type::SEND_FILE => Self::SendFile {
                name: FileName::decode(&mut r)?,
                index: r.read_u16_be()?,
                total_parts: r.read_u16_be()?,
                payload: r.read_rest().to_vec(),
            },
            msg_type::SEND_FILE_RESPONSE => Self::SendFileResponse {
                crc: r.read_u16_be()?,
            },
            msg_type::DELETE_FILE => Self::DeleteFile {
                name: FileName::decode(&mut r)?,
            },
            msg_type::DELETE_FILE_RESPONSE => Self::DeleteFileResponse,
            msg_type::GET_FILE_UART => Self::GetFileUart {
                name: FileName::decode(&mut r)?,
            },
            msg_type::GET_FILE_UART_RESPONSE => Self::GetFileUartResponse,
            msg_type::FILE_DATA_CHUNK => Self::FileDataChunk {
                fileref: r.read_u8()?,
                offset: r.read_u32_le()?,
                payload: r.read_rest().to_vec(),
            },
            msg_type::REFORMAT_DISK => Self::ReformatDisk,
            msg_type::REFORMAT_DISK_RESPONSE => Self::ReformatDiskResponse,
            msg_type::EXECUTE_COMMAND => Self::ExecuteCommand {
                command_id: r.read_u8()?,
                payload: r.read_rest().to_vec(),
            },
            msg_type::EXECUTE_COMMAND_RESPONSE => Self::ExecuteCommandResponse {
                response_code: r.read_u8()?,
                payload: r.read_rest().to_vec(),
            },
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}

fn required_value<'a>(
    attribute_id: u8,
    value: &'a Option<Attribute>,
) -> Result<&'a Attribute, EncodeError> {
    value
        .as_ref()
        .ok_or(EncodeError::MissingAttributeValue { attribute_id })
}

fn value_length_byte(attribute_id: u8, value: &Attribute) -> Result<u8, EncodeError> {
    let length = value.encoded_len();
    u8::try_from(length).map_err(|_| EncodeError::AttributeValueTooLong {
        attribute_id,
        length,
    })
}
