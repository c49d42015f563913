//! Storage of the site content singleton.

use std::time::SystemTime;

use rusqlite::{named_params, Connection, OptionalExtension};

use crate::error::Result;
use crate::site::SiteContent;

use super::connection::Database;
use super::timestamps::{from_unix_secs, to_unix_secs};

const SELECT_SITE_CONTENT: &str = r"
    SELECT slide1_title, slide1_subtitle, slide2_title, slide2_subtitle,
           slide3_title, slide3_subtitle, phone, email, address, map_link,
           facebook, instagram, twitter, updated_at
    FROM site_content
    WHERE id = 1
";

const UPSERT_SITE_CONTENT: &str = r"
    INSERT OR REPLACE INTO site_content
    (id, slide1_title, slide1_subtitle, slide2_title, slide2_subtitle,
     slide3_title, slide3_subtitle, phone, email, address, map_link,
     facebook, instagram, twitter, updated_at)
    VALUES (1, :slide1_title, :slide1_subtitle, :slide2_title, :slide2_subtitle,
            :slide3_title, :slide3_subtitle, :phone, :email, :address, :map_link,
            :facebook, :instagram, :twitter, :updated_at)
";

fn row_to_site_content(row: &rusqlite::Row<'_>) -> rusqlite::Result<SiteContent> {
    Ok(SiteContent {
        slide1_title: row.get(0)?,
        slide1_subtitle: row.get(1)?,
        slide2_title: row.get(2)?,
        slide2_subtitle: row.get(3)?,
        slide3_title: row.get(4)?,
        slide3_subtitle: row.get(5)?,
        phone: row.get(6)?,
        email: row.get(7)?,
        address: row.get(8)?,
        map_link: row.get(9)?,
        facebook: row.get(10)?,
        instagram: row.get(11)?,
        twitter: row.get(12)?,
        updated_at: Some(from_unix_secs(row.get(13)?)),
    })
}

impl Database {
    /// Reads the site content, storing the defaults on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the initial insert fails.
    pub fn site_content(conn: &Connection, now: SystemTime) -> Result<SiteContent> {
        if let Some(content) = conn
            .query_row(SELECT_SITE_CONTENT, [], row_to_site_content)
            .optional()?
        {
            return Ok(content);
        }
        log::debug!("site content missing, storing defaults");
        Self::save_site_content(conn, &SiteContent::default(), now)
    }

    /// Overwrites the site content and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_site_content(
        conn: &Connection,
        content: &SiteContent,
        now: SystemTime,
    ) -> Result<SiteContent> {
        let updated_secs = to_unix_secs(now)?;
        conn.execute(
            UPSERT_SITE_CONTENT,
            named_params! {
                ":slide1_title": content.slide1_title,
                ":slide1_subtitle": content.slide1_subtitle,
                ":slide2_title": content.slide2_title,
                ":slide2_subtitle": content.slide2_subtitle,
                ":slide3_title": content.slide3_title,
                ":slide3_subtitle": content.slide3_subtitle,
                ":phone": content.phone,
                ":email": content.email,
                ":address": content.address,
                ":map_link": content.map_link,
                ":facebook": content.facebook,
                ":instagram": content.instagram,
                ":twitter": content.twitter,
                ":updated_at": updated_secs,
            },
        )?;
        Ok(SiteContent {
            updated_at: Some(from_unix_secs(updated_secs)),
            ..content.clone()
        })
    }
}
