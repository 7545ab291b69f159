/*
 * Responsibility
 * - API のバージョン別モジュールの公開ポイント
 * - 現状は v1 のみ (/api/v1)
 */
pub mod v1;
