use serde::Deserialize;

/// Identifier assigned by the listing service, by catalog order at fetch
/// time (1-based). Unique within one fetched catalog, but a refetch may
/// reassign ids when the underlying file set changed, so ids must never
/// be persisted across fetches.
pub type TrackId = u64;

/// One playable file as listed by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: TrackId,
    /// Display filename (basename only, no directory segments).
    pub name: String,
    /// Locator relative to the server's public media root. Opaque here;
    /// only the media URL builder interprets it.
    pub path: String,
}
