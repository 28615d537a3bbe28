// Media upload: multipart intake plus pluggable storage (S3 with local-disk fallback).
// The returned reference feeds the generator's audioPath / videoPath fields.

pub mod handlers;
pub mod storage;
