// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    music (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        title -> Text,
        author -> Text,
        cover -> Text,
        douban -> Text,
        mp3 -> Text,
        ogg -> Text,
    }
}
